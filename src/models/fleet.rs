//! Snapshot de la flota
//!
//! La colección completa y ordenada de vehículos en un instante dado.
//! Es la unidad de lectura y escritura del store: se carga entera y se
//! persiste entera.

use serde::{Deserialize, Serialize};

use super::vehicle::{Vehicle, VehicleStatus};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FleetSnapshot {
    vehicles: Vec<Vehicle>,
}

impl FleetSnapshot {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn into_vehicles(self) -> Vec<Vehicle> {
        self.vehicles
    }

    pub fn find(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.vehicles.iter().position(|v| v.id == id)
    }

    pub fn count_in_status(&self, status: VehicleStatus) -> usize {
        self.vehicles.iter().filter(|v| v.status == status).count()
    }

    pub fn push(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }

    /// Reemplazar el vehículo en `index` conservando el orden de inserción
    pub fn replace(&mut self, index: usize, vehicle: Vehicle) {
        self.vehicles[index] = vehicle;
    }

    pub fn remove(&mut self, id: &str) -> Option<Vehicle> {
        let index = self.position(id)?;
        Some(self.vehicles.remove(index))
    }
}

impl From<Vec<Vehicle>> for FleetSnapshot {
    fn from(vehicles: Vec<Vehicle>) -> Self {
        Self::new(vehicles)
    }
}
