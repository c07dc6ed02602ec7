use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::controllers::vehicle_controller::NewVehicle;
use crate::models::vehicle::{VehiclePatch, VehicleStatus};
use crate::services::vehicle_query::{SortSpec, VehicleFilter};
use crate::utils::validation::validate_license_plate;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_license_plate")]
    pub license_plate: String,
    pub status: Option<VehicleStatus>,
}

// Request para actualizar un vehículo; solo se aplican los campos presentes
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(custom = "validate_license_plate")]
    pub license_plate: Option<String>,
    pub status: Option<VehicleStatus>,
}

// Parámetros del listado: ?q=...&status=...&sort=campo:dirección
#[derive(Debug, Default, Deserialize)]
pub struct ListVehiclesQuery {
    pub q: Option<String>,
    pub status: Option<VehicleStatus>,
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

impl From<CreateVehicleRequest> for NewVehicle {
    fn from(request: CreateVehicleRequest) -> Self {
        Self {
            license_plate: request.license_plate,
            status: request.status,
        }
    }
}

impl From<UpdateVehicleRequest> for VehiclePatch {
    fn from(request: UpdateVehicleRequest) -> Self {
        Self {
            license_plate: request.license_plate,
            status: request.status,
        }
    }
}

impl From<ListVehiclesQuery> for VehicleFilter {
    fn from(query: ListVehiclesQuery) -> Self {
        Self {
            text_query: query.q,
            status: query.status,
            sort: query
                .sort
                .filter(|s| !s.is_empty())
                .map(|s| SortSpec::parse(&s))
                .unwrap_or_default(),
        }
    }
}
