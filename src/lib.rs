//! Registro de vehículos de la flota
//!
//! Servicio HTTP de altas, consultas, cambios de estado y bajas de vehículos,
//! con las reglas de negocio de la flota y persistencia en un fichero JSON.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
