//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del servidor y del store de la flota.

pub mod environment;

pub use environment::*;
