//! Búsqueda, filtrado y ordenación de la flota
//!
//! Trabaja sobre un snapshot recién cargado; no pasa por las reglas de negocio.

use std::cmp::Ordering;

use crate::models::fleet::FleetSnapshot;
use crate::models::vehicle::{Vehicle, VehicleStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    LicensePlate,
    Status,
    Id,
    /// Campo desconocido: todos los pares comparan igual y se conserva
    /// el orden de inserción.
    Unknown(String),
}

impl SortField {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "createdAt" => SortField::CreatedAt,
            "licensePlate" => SortField::LicensePlate,
            "status" => SortField::Status,
            "id" => SortField::Id,
            other => SortField::Unknown(other.to_string()),
        }
    }

    fn compare(&self, a: &Vehicle, b: &Vehicle) -> Ordering {
        match self {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::LicensePlate => a.license_plate.cmp(&b.license_plate),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::Id => a.id.cmp(&b.id),
            SortField::Unknown(_) => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Especificación `campo:dirección`. Solo `desc` ordena descendente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(2, ':');
        let field = SortField::parse(parts.next().unwrap_or_default());
        let direction = match parts.next() {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self { field, direction }
    }
}

/// Filtros para el listado de vehículos
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleFilter {
    pub text_query: Option<String>,
    pub status: Option<VehicleStatus>,
    pub sort: SortSpec,
}

impl VehicleFilter {
    fn matches(&self, vehicle: &Vehicle, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            if !vehicle.license_plate.to_lowercase().contains(needle) {
                return false;
            }
        }
        self.status.map_or(true, |status| vehicle.status == status)
    }

    /// Aplicar filtros y ordenación estable sobre el snapshot
    pub fn apply(&self, snapshot: FleetSnapshot) -> Vec<Vehicle> {
        let needle = self
            .text_query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let mut vehicles: Vec<Vehicle> = snapshot
            .into_vehicles()
            .into_iter()
            .filter(|v| self.matches(v, needle.as_deref()))
            .collect();

        let field = &self.sort.field;
        match self.sort.direction {
            SortDirection::Asc => vehicles.sort_by(|a, b| field.compare(a, b)),
            SortDirection::Desc => vehicles.sort_by(|a, b| field.compare(a, b).reverse()),
        }
        vehicles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn vehicle(id: &str, plate: &str, status: VehicleStatus, month: u32) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            license_plate: plate.to_string(),
            status,
            created_at: Utc.with_ymd_and_hms(2024, month, 1, 9, 0, 0).unwrap(),
        }
    }

    fn seed() -> FleetSnapshot {
        FleetSnapshot::new(vec![
            vehicle("v1", "123-45-601", VehicleStatus::Available, 1),
            vehicle("v2", "987-65-432", VehicleStatus::InUse, 2),
            vehicle("v3", "555-11-222", VehicleStatus::Maintenance, 3),
            vehicle("v4", "444-22-333", VehicleStatus::Available, 4),
            vehicle("v5", "333-99-888", VehicleStatus::Available, 5),
        ])
    }

    fn ids(vehicles: &[Vehicle]) -> Vec<&str> {
        vehicles.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn test_default_is_created_at_descending() {
        let result = VehicleFilter::default().apply(seed());
        assert_eq!(ids(&result), vec!["v5", "v4", "v3", "v2", "v1"]);
    }

    #[test]
    fn test_text_query_is_case_insensitive_substring() {
        let filter = VehicleFilter {
            text_query: Some("333".to_string()),
            ..Default::default()
        };
        let result = filter.apply(seed());
        assert_eq!(ids(&result), vec!["v5", "v4"]);
        assert!(result.iter().all(|v| v.license_plate.contains("333")));

        let mut snapshot = seed();
        snapshot.push(vehicle("v6", "AB-1234567", VehicleStatus::InUse, 6));
        let filter = VehicleFilter {
            text_query: Some("ab-".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(snapshot)), vec!["v6"]);
    }

    #[test]
    fn test_empty_text_query_matches_everything() {
        let filter = VehicleFilter {
            text_query: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter.apply(seed()).len(), 5);
    }

    #[test]
    fn test_status_filter_is_exact() {
        let filter = VehicleFilter {
            status: Some(VehicleStatus::Maintenance),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(seed())), vec!["v3"]);
    }

    #[test]
    fn test_sort_by_plate_both_directions() {
        let asc = VehicleFilter {
            sort: SortSpec::parse("licensePlate:asc"),
            ..Default::default()
        };
        assert_eq!(ids(&asc.apply(seed())), vec!["v1", "v5", "v4", "v3", "v2"]);

        let desc = VehicleFilter {
            sort: SortSpec::parse("licensePlate:desc"),
            ..Default::default()
        };
        assert_eq!(ids(&desc.apply(seed())), vec!["v2", "v3", "v4", "v5", "v1"]);
    }

    #[test]
    fn test_sort_by_status_is_stable() {
        let filter = VehicleFilter {
            sort: SortSpec::parse("status:asc"),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(seed())), vec!["v1", "v4", "v5", "v2", "v3"]);
    }

    #[test]
    fn test_unknown_field_keeps_insertion_order() {
        let spec = SortSpec::parse("color:desc");
        assert_eq!(spec.field, SortField::Unknown("color".to_string()));
        let filter = VehicleFilter {
            sort: spec,
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(seed())), vec!["v1", "v2", "v3", "v4", "v5"]);
    }

    #[test]
    fn test_direction_defaults_to_ascending() {
        let spec = SortSpec::parse("createdAt");
        assert_eq!(spec.direction, SortDirection::Asc);
        assert_eq!(SortSpec::parse("createdAt:DESC").direction, SortDirection::Asc);
    }
}
