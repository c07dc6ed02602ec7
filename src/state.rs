//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::vehicle_controller::{VehicleController, VehicleControllerOptions};
use crate::repositories::vehicle_repository::{JsonFileVehicleStore, VehicleStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub vehicles: Arc<VehicleController>,
}

impl AppState {
    /// Estado con el store JSON ubicado en `config.db_path`
    pub fn new(config: EnvironmentConfig) -> Self {
        let store = Arc::new(JsonFileVehicleStore::new(config.db_path.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: EnvironmentConfig, store: Arc<dyn VehicleStore>) -> Self {
        let options = VehicleControllerOptions::from(&config);
        Self {
            config: Arc::new(config),
            vehicles: Arc::new(VehicleController::new(store, options)),
        }
    }
}
