//! Controllers
//!
//! Orquestación de las operaciones de la flota sobre el store.

pub mod vehicle_controller;

pub use vehicle_controller::{NewVehicle, VehicleController, VehicleControllerOptions};
