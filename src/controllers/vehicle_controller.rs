//! Controller de vehículos
//!
//! Orquesta cada operación como un único ciclo cargar → comprobar → mutar →
//! guardar. Las mutaciones solo se aplican después de que pasan todas las
//! reglas, así que un fallo nunca deja estado a medias.
//!
//! Los ciclos de escritura se serializan con un mutex por controller; dos
//! peticiones concurrentes no pueden pasar la comprobación de cupo contra el
//! mismo snapshot. Las lecturas no toman el lock: el store reemplaza el
//! fichero de forma atómica y siempre ven el último snapshot completo. Si el
//! fichero no existe, una lectura puede crearlo vacío, pero esa creación nunca
//! sobrescribe un snapshot guardado por una escritura.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, warn};
use validator::ValidationError;

use crate::config::environment::EnvironmentConfig;
use crate::models::fleet::FleetSnapshot;
use crate::models::vehicle::{Vehicle, VehiclePatch, VehicleStatus};
use crate::repositories::vehicle_repository::VehicleStore;
use crate::services::fleet_rules;
use crate::services::vehicle_query::VehicleFilter;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};
use crate::utils::validation::normalize_license_plate;

/// Opciones de comportamiento del controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleControllerOptions {
    pub allow_plate_correction: bool,
    pub recover_corrupt_state: bool,
}

impl Default for VehicleControllerOptions {
    fn default() -> Self {
        Self {
            allow_plate_correction: true,
            recover_corrupt_state: false,
        }
    }
}

impl From<&EnvironmentConfig> for VehicleControllerOptions {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            allow_plate_correction: config.allow_plate_correction,
            recover_corrupt_state: config.recover_corrupt_state,
        }
    }
}

/// Datos para dar de alta un vehículo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub license_plate: String,
    pub status: Option<VehicleStatus>,
}

pub struct VehicleController {
    store: Arc<dyn VehicleStore>,
    options: VehicleControllerOptions,
    write_lock: Mutex<()>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn VehicleStore>, options: VehicleControllerOptions) -> Self {
        Self {
            store,
            options,
            write_lock: Mutex::new(()),
        }
    }

    async fn load_snapshot(&self) -> AppResult<FleetSnapshot> {
        match self.store.load().await {
            Err(AppError::CorruptState(msg)) if self.options.recover_corrupt_state => {
                error!("❌ Fleet store is corrupt ({}), continuing with an empty fleet", msg);
                Ok(FleetSnapshot::default())
            }
            other => other,
        }
    }

    pub async fn list(&self, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>> {
        let snapshot = self.load_snapshot().await?;
        Ok(filter.apply(snapshot))
    }

    pub async fn get(&self, id: &str) -> AppResult<Vehicle> {
        let snapshot = self.load_snapshot().await?;
        snapshot
            .find(id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn create(&self, request: NewVehicle) -> AppResult<Vehicle> {
        let license_plate = normalize_license_plate(&request.license_plate)?;
        let vehicle = Vehicle::new(license_plate, request.status.unwrap_or_default());

        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.load_snapshot().await?;

        if vehicle.status == VehicleStatus::Maintenance {
            let admission = fleet_rules::evaluate_maintenance_admission(&snapshot, true);
            if !admission.is_admitted() {
                return Err(capacity_error(admission.allowed));
            }
        }

        snapshot.push(vehicle.clone());
        self.store.save(&snapshot).await?;

        info!(
            "🚗 Vehicle {} created ({}, {})",
            vehicle.id, vehicle.license_plate, vehicle.status
        );
        Ok(vehicle)
    }

    pub async fn update(&self, id: &str, patch: VehiclePatch) -> AppResult<Vehicle> {
        let patch = self.validate_patch(patch)?;

        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.load_snapshot().await?;

        let index = snapshot
            .position(id)
            .ok_or_else(|| not_found_error("Vehicle", id))?;
        let before = &snapshot.vehicles()[index];

        if let Some(requested) = patch.status {
            if !fleet_rules::can_transition(before.status, requested) {
                return Err(AppError::InvalidTransition(format!(
                    "Vehicle {} is in Maintenance and can only be switched to Available (requested {})",
                    id, requested
                )));
            }

            if requested == VehicleStatus::Maintenance && before.status != VehicleStatus::Maintenance {
                let admission = fleet_rules::evaluate_maintenance_admission(&snapshot, false);
                if !admission.is_admitted() {
                    return Err(capacity_error(admission.allowed));
                }
            }
        }

        let updated = before.apply_patch(&patch);
        snapshot.replace(index, updated.clone());
        self.store.save(&snapshot).await?;

        info!("✏️ Vehicle {} updated ({}, {})", id, updated.license_plate, updated.status);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.load_snapshot().await?;

        let vehicle = snapshot
            .find(id)
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        if !fleet_rules::can_delete(vehicle) {
            return Err(AppError::DeletionNotAllowed(format!(
                "Only Available vehicles can be deleted (vehicle {} is {})",
                id, vehicle.status
            )));
        }

        snapshot.remove(id);
        self.store.save(&snapshot).await?;

        info!("🗑️ Vehicle {} deleted", id);
        Ok(())
    }

    fn validate_patch(&self, patch: VehiclePatch) -> AppResult<VehiclePatch> {
        let license_plate = match patch.license_plate {
            Some(_) if !self.options.allow_plate_correction => {
                let mut error = ValidationError::new("license_plate_immutable");
                error.message = Some("License plate cannot be changed".into());
                return Err(validation_error("licensePlate", error));
            }
            Some(raw) => Some(normalize_license_plate(&raw)?),
            None => None,
        };
        Ok(VehiclePatch {
            license_plate,
            status: patch.status,
        })
    }
}

fn capacity_error(allowed: usize) -> AppError {
    warn!("Maintenance cap of {} reached", allowed);
    AppError::Capacity(format!("Maintenance cap reached (max {}).", allowed))
}
