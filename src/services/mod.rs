//! Services module
//!
//! Este módulo contiene la lógica de negocio pura de la flota: las reglas
//! que deciden si una mutación es legal y el filtrado de listados.

pub mod fleet_rules;
pub mod vehicle_query;

pub use vehicle_query::{SortDirection, SortField, SortSpec, VehicleFilter};
