//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Capacity exceeded: {0}")]
    Capacity(String),

    #[error("Deletion not allowed: {0}")]
    DeletionNotAllowed(String),

    #[error("Corrupt state: {0}")]
    CorruptState(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::InvalidTransition(_)
            | AppError::Capacity(_)
            | AppError::DeletionNotAllowed(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CorruptState(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                ErrorResponse {
                    details: Some(json!(e)),
                    ..ErrorResponse::new("Validation Error", e.to_string(), "VALIDATION_ERROR")
                }
            }

            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                ErrorResponse::new("Bad Request", msg, "BAD_REQUEST")
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                ErrorResponse::new("Not Found", msg, "NOT_FOUND")
            }

            AppError::InvalidTransition(msg) => {
                warn!("Invalid status transition: {}", msg);
                ErrorResponse::new("Invalid Transition", msg, "INVALID_TRANSITION")
            }

            AppError::Capacity(msg) => {
                warn!("Maintenance capacity exceeded: {}", msg);
                ErrorResponse::new("Capacity Exceeded", msg, "CAPACITY_EXCEEDED")
            }

            AppError::DeletionNotAllowed(msg) => {
                warn!("Deletion rejected: {}", msg);
                ErrorResponse::new("Deletion Not Allowed", msg, "DELETION_NOT_ALLOWED")
            }

            AppError::CorruptState(msg) => {
                error!("Corrupt fleet state: {}", msg);
                ErrorResponse {
                    details: Some(json!({ "corrupt_state": msg })),
                    ..ErrorResponse::new(
                        "Corrupt State",
                        "The persisted fleet data could not be read".to_string(),
                        "CORRUPT_STATE",
                    )
                }
            }

            AppError::Storage(e) => {
                error!("Storage error: {}", e);
                ErrorResponse {
                    details: Some(json!({ "io_error": e.to_string() })),
                    ..ErrorResponse::new(
                        "Storage Error",
                        "An error occurred while accessing the fleet store".to_string(),
                        "STORAGE_ERROR",
                    )
                }
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ErrorResponse {
                    details: Some(json!({ "internal_error": msg })),
                    ..ErrorResponse::new(
                        "Internal Server Error",
                        "An unexpected error occurred".to_string(),
                        "INTERNAL_ERROR",
                    )
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, error: validator::ValidationError) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}
