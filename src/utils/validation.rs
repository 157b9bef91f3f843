//! Helpers de validación
//!
//! Este módulo contiene validaciones compartidas: parsing tolerante de fechas
//! ISO y validadores custom para los DTOs de ajustes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::ValidationError;

/// Parsear una fecha ISO (YYYY-MM-DD) sin componente horario.
/// Devuelve None ante cualquier valor no parseable; nunca es un error.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Validador custom: importes monetarios no negativos
pub fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        let mut error = ValidationError::new("amount");
        error.add_param("message".into(), &"amount must be >= 0");
        return Err(error);
    }
    Ok(())
}
