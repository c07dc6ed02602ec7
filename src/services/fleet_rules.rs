//! Reglas de negocio de la flota
//!
//! Predicados puros sobre un snapshot y un cambio propuesto. No tienen
//! efectos secundarios; el controller los evalúa siempre contra el snapshot
//! anterior a la mutación.

use crate::models::fleet::FleetSnapshot;
use crate::models::vehicle::{Vehicle, VehicleStatus};

/// Porcentaje máximo de la flota que puede estar en mantenimiento
pub const MAINTENANCE_PERCENT: usize = 5;

/// Máximo de vehículos en mantenimiento para una flota de `total` vehículos:
/// `max(1, floor(total * 5%))`. Siempre se permite al menos uno.
pub fn max_maintenance_allowed(total: usize) -> usize {
    (total * MAINTENANCE_PERCENT / 100).max(1)
}

pub fn count_in_status(snapshot: &FleetSnapshot, status: VehicleStatus) -> usize {
    snapshot.count_in_status(status)
}

/// `Maintenance` solo puede salir hacia `Available`; el resto de estados
/// pueden pasar a cualquier otro, incluido el mismo.
pub fn can_transition(current: VehicleStatus, requested: VehicleStatus) -> bool {
    !(current == VehicleStatus::Maintenance && requested != VehicleStatus::Available)
}

/// Resultado de evaluar la entrada de un vehículo más en mantenimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceAdmission {
    pub allowed: usize,
    pub projected: usize,
}

impl MaintenanceAdmission {
    pub fn is_admitted(&self) -> bool {
        self.projected <= self.allowed
    }
}

/// Evaluar la entrada en mantenimiento sobre el snapshot previo a la mutación.
/// `is_new_record` cuenta el vehículo que se está creando en el total.
pub fn evaluate_maintenance_admission(
    snapshot: &FleetSnapshot,
    is_new_record: bool,
) -> MaintenanceAdmission {
    let total = snapshot.len() + usize::from(is_new_record);
    MaintenanceAdmission {
        allowed: max_maintenance_allowed(total),
        projected: count_in_status(snapshot, VehicleStatus::Maintenance) + 1,
    }
}

pub fn can_admit_maintenance(snapshot: &FleetSnapshot, is_new_record: bool) -> bool {
    evaluate_maintenance_admission(snapshot, is_new_record).is_admitted()
}

pub fn can_delete(vehicle: &Vehicle) -> bool {
    vehicle.status == VehicleStatus::Available
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleStatus::*;

    fn fleet(statuses: &[VehicleStatus]) -> FleetSnapshot {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| Vehicle {
                id: format!("v{}", i + 1),
                ..Vehicle::new(format!("{:07}", i + 1), *status)
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_max_maintenance_allowed_has_floor_of_one() {
        for total in 0..=39 {
            assert_eq!(max_maintenance_allowed(total), 1, "total {}", total);
        }
        assert_eq!(max_maintenance_allowed(40), 2);
        assert_eq!(max_maintenance_allowed(59), 2);
        assert_eq!(max_maintenance_allowed(60), 3);
        assert_eq!(max_maintenance_allowed(1000), 50);
    }

    #[test]
    fn test_max_maintenance_allowed_matches_formula() {
        for total in 0..500usize {
            let expected = std::cmp::max(1, (total as f64 * 0.05).floor() as usize);
            assert_eq!(max_maintenance_allowed(total), expected);
        }
    }

    #[test]
    fn test_maintenance_only_exits_to_available() {
        assert!(can_transition(Maintenance, Available));
        assert!(!can_transition(Maintenance, InUse));
        assert!(!can_transition(Maintenance, Maintenance));
    }

    #[test]
    fn test_other_statuses_move_freely() {
        for from in [Available, InUse] {
            for to in VehicleStatus::ALL {
                assert!(can_transition(from, to), "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_admission_counts_new_record_in_total() {
        // 5 vehículos, 1 en mantenimiento: tope = max(1, floor(6 * 0.05)) = 1
        let snapshot = fleet(&[Available, InUse, Maintenance, Available, Available]);
        let admission = evaluate_maintenance_admission(&snapshot, true);
        assert_eq!(admission, MaintenanceAdmission { allowed: 1, projected: 2 });
        assert!(!can_admit_maintenance(&snapshot, true));
        assert!(!can_admit_maintenance(&snapshot, false));
    }

    #[test]
    fn test_admission_on_empty_and_growing_fleets() {
        assert!(can_admit_maintenance(&FleetSnapshot::default(), true));

        let mut statuses = vec![Available; 39];
        statuses.push(Maintenance);
        let forty = fleet(&statuses);
        assert!(can_admit_maintenance(&forty, false));

        // 39 vehículos + 1 nuevo = 40 -> tope 2
        let thirty_nine = fleet(&statuses[1..]);
        assert!(can_admit_maintenance(&thirty_nine, true));
        assert!(!can_admit_maintenance(&thirty_nine, false));
    }

    #[test]
    fn test_only_available_can_be_deleted() {
        let snapshot = fleet(&[Available, InUse, Maintenance]);
        let deletable: Vec<_> = snapshot
            .vehicles()
            .iter()
            .filter(|v| can_delete(v))
            .map(|v| v.id.as_str())
            .collect();
        assert_eq!(deletable, vec!["v1"]);
    }

    #[test]
    fn test_count_in_status() {
        let snapshot = fleet(&[Available, InUse, Maintenance, Available]);
        assert_eq!(count_in_status(&snapshot, Available), 2);
        assert_eq!(count_in_status(&snapshot, InUse), 1);
        assert_eq!(count_in_status(&snapshot, Maintenance), 1);
    }
}
