//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DB_PATH: &str = "data/vehicles.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be true or false, got '{value}'")]
    InvalidBool { name: &'static str, value: String },

    #[error("{name} must be one of trace, debug, info, warn, error, got '{value}'")]
    InvalidLogLevel { name: &'static str, value: String },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Ubicación del fichero JSON de la flota
    pub db_path: PathBuf,
    pub cors_origins: Vec<String>,
    pub log_level: Option<tracing::Level>,
    /// Permitir corregir la matrícula en un update
    pub allow_plate_correction: bool,
    /// Tratar un fichero ilegible como flota vacía en vez de fallar
    pub recover_corrupt_state: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 4000,
            host: "0.0.0.0".to_string(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            cors_origins: Vec::new(),
            log_level: None,
            allow_plate_correction: true,
            recover_corrupt_state: false,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Cargar la configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name: "PORT", value })?,
            None => defaults.port,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let log_level = match lookup("LOG_LEVEL") {
            Some(value) => Some(
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidLogLevel { name: "LOG_LEVEL", value })?,
            ),
            None => None,
        };

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: lookup("HOST").unwrap_or(defaults.host),
            db_path: lookup("DB_PATH").map(PathBuf::from).unwrap_or(defaults.db_path),
            cors_origins,
            log_level,
            allow_plate_correction: parse_bool(
                "ALLOW_PLATE_CORRECTION",
                lookup("ALLOW_PLATE_CORRECTION"),
                defaults.allow_plate_correction,
            )?,
            recover_corrupt_state: parse_bool(
                "RECOVER_CORRUPT_STATE",
                lookup("RECOVER_CORRUPT_STATE"),
                defaults.recover_corrupt_state,
            )?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Nivel de log efectivo: explícito, o según el entorno
    pub fn effective_log_level(&self) -> tracing::Level {
        self.log_level.unwrap_or(if self.is_development() {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
    }
}

fn parse_bool(name: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { name, value }),
    }
}
