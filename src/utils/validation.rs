//! Utilidades de validación
//!
//! Este módulo contiene la validación del formato de matrícula, usada tanto
//! por los DTOs (`#[validate(custom = ...)]`) como por el controller.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::utils::errors::{validation_error, AppResult};

/// Mínimo de dígitos en una matrícula, sin contar separadores
pub const LICENSE_PLATE_MIN_DIGITS: usize = 7;
/// Longitud máxima de la matrícula recortada
pub const LICENSE_PLATE_MAX_LEN: usize = 20;

lazy_static! {
    // Grupos de dígitos separados por guiones simples
    static ref LICENSE_PLATE_REGEX: Regex =
        Regex::new(r"^[0-9]+(?:-[0-9]+)*$").expect("license plate regex is valid");
}

fn plate_error(code: &'static str, message: &'static str, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error.add_param("value".into(), &value.to_string());
    error
}

/// Validar formato de matrícula
///
/// Se ignoran los espacios en blanco al comprobar el patrón; la matrícula
/// almacenada es la entrada recortada.
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

    if !LICENSE_PLATE_REGEX.is_match(&compact) {
        return Err(plate_error("license_plate_format", "Invalid format", value));
    }

    let digits = compact.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < LICENSE_PLATE_MIN_DIGITS {
        let mut error = plate_error("license_plate_too_short", "Too short", value);
        error.add_param("min_digits".into(), &LICENSE_PLATE_MIN_DIGITS);
        return Err(error);
    }

    if trimmed.chars().count() > LICENSE_PLATE_MAX_LEN {
        let mut error = plate_error("license_plate_too_long", "Too long", value);
        error.add_param("max".into(), &LICENSE_PLATE_MAX_LEN);
        return Err(error);
    }

    Ok(())
}

/// Validar y normalizar una matrícula, devolviendo la forma que se persiste
pub fn normalize_license_plate(raw: &str) -> AppResult<String> {
    validate_license_plate(raw).map_err(|e| validation_error("licensePlate", e))?;
    Ok(raw.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    #[test]
    fn test_accepts_hyphenated_digit_groups() {
        assert!(validate_license_plate("123-45-601").is_ok());
        assert!(validate_license_plate("1234567").is_ok());
        assert!(validate_license_plate("  111-22-333  ").is_ok());
        assert!(validate_license_plate("111 - 22 - 333").is_ok());
    }

    #[test]
    fn test_rejects_bad_format() {
        for bad in ["x", "", "12-ab-345", "123--4567", "-1234567", "1234567-", "12_34_567"] {
            let err = validate_license_plate(bad).unwrap_err();
            assert_eq!(err.code, "license_plate_format", "input {:?}", bad);
        }
    }

    #[test]
    fn test_rejects_too_few_digits() {
        let err = validate_license_plate("12-34-56").unwrap_err();
        assert_eq!(err.code, "license_plate_too_short");
    }

    #[test]
    fn test_rejects_too_long() {
        let err = validate_license_plate("123456789-123456789-1").unwrap_err();
        assert_eq!(err.code, "license_plate_too_long");
    }

    #[test]
    fn test_normalize_trims_and_wraps_errors() {
        assert_eq!(normalize_license_plate(" 111-22-333 ").unwrap(), "111-22-333");
        assert!(matches!(
            normalize_license_plate("x"),
            Err(AppError::Validation(_))
        ));
    }
}
