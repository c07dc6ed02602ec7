//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que se persisten en el
//! fichero de la flota.

pub mod fleet;
pub mod vehicle;

pub use fleet::FleetSnapshot;
pub use vehicle::{Vehicle, VehiclePatch, VehicleStatus};
