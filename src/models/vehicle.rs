//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, su estado operativo y el patch
//! explícito usado en las actualizaciones parciales. El formato serializado
//! es exactamente el que se persiste en el fichero de la flota.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado operativo del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VehicleStatus {
    Available,
    InUse,
    Maintenance,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Available,
        VehicleStatus::InUse,
        VehicleStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::InUse => "InUse",
            VehicleStatus::Maintenance => "Maintenance",
        }
    }
}

impl Default for VehicleStatus {
    fn default() -> Self {
        VehicleStatus::Available
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown vehicle status '{}'", s))
    }
}

/// Vehicle principal - un registro de la flota tal y como se persiste
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub license_plate: String,
    pub status: VehicleStatus,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Crear un vehículo nuevo con id y fecha de creación generados
    pub fn new(license_plate: String, status: VehicleStatus) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            license_plate,
            status,
            // misma precisión que la forma persistida
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    /// Aplicar un patch campo a campo; `id` y `created_at` nunca cambian
    pub fn apply_patch(&self, patch: &VehiclePatch) -> Vehicle {
        Vehicle {
            id: self.id.clone(),
            license_plate: patch
                .license_plate
                .clone()
                .unwrap_or_else(|| self.license_plate.clone()),
            status: patch.status.unwrap_or(self.status),
            created_at: self.created_at,
        }
    }
}

/// Cambios opcionales sobre un vehículo existente
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehiclePatch {
    pub license_plate: Option<String>,
    pub status: Option<VehicleStatus>,
}

/// Fechas ISO-8601 en UTC con milisegundos (`2024-01-01T09:00:00.000Z`)
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vehicle {
        serde_json::from_value(json!({
            "id": "v1",
            "licensePlate": "123-45-601",
            "status": "Available",
            "createdAt": "2024-01-01T09:00:00.000Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_serializes_camel_case_with_millis() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["licensePlate"], "123-45-601");
        assert_eq!(value["status"], "Available");
        assert_eq!(value["createdAt"], "2024-01-01T09:00:00.000Z");
    }

    #[test]
    fn test_accepts_rfc3339_without_fraction() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "id": "v9",
            "licensePlate": "1234567",
            "status": "InUse",
            "createdAt": "2024-06-01T10:00:00+02:00"
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&vehicle).unwrap()["createdAt"],
            "2024-06-01T08:00:00.000Z"
        );
    }

    #[test]
    fn test_rejects_unknown_status() {
        let result: Result<Vehicle, _> = serde_json::from_value(json!({
            "id": "v1",
            "licensePlate": "1234567",
            "status": "Retired",
            "createdAt": "2024-01-01T09:00:00.000Z"
        }));
        assert!(result.is_err());
        assert!("Retired".parse::<VehicleStatus>().is_err());
        assert_eq!("InUse".parse::<VehicleStatus>(), Ok(VehicleStatus::InUse));
    }

    #[test]
    fn test_apply_patch_only_touches_supplied_fields() {
        let before = sample();

        let status_only = before.apply_patch(&VehiclePatch {
            license_plate: None,
            status: Some(VehicleStatus::InUse),
        });
        assert_eq!(status_only.status, VehicleStatus::InUse);
        assert_eq!(status_only.license_plate, before.license_plate);
        assert_eq!(status_only.id, before.id);
        assert_eq!(status_only.created_at, before.created_at);

        let untouched = before.apply_patch(&VehiclePatch::default());
        assert_eq!(untouched, before);
    }

    #[test]
    fn test_new_vehicle_gets_fresh_identity() {
        let a = Vehicle::new("1234567".to_string(), VehicleStatus::default());
        let b = Vehicle::new("1234567".to_string(), VehicleStatus::default());
        assert_ne!(a.id, b.id);
        assert_eq!(a.status, VehicleStatus::Available);
    }
}
