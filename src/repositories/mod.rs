//! Repositorios
//!
//! Persistencia de la flota.

pub mod vehicle_repository;

pub use vehicle_repository::{JsonFileVehicleStore, VehicleStore};
