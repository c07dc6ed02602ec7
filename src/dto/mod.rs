//! DTOs de la API
//!
//! Cuerpos de petición y parámetros de consulta de la capa HTTP.

pub mod vehicle_dto;
