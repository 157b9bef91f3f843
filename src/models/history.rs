//! Modelos de historial
//!
//! Este módulo contiene la entrada genérica de historial (mantenimientos,
//! reparaciones y cargas de combustible comparten la misma forma para el
//! notificador) y la muestra de kilometraje derivada por vehículo.
//! No existe odómetro autoritativo: la muestra más reciente hace de proxy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Entrada de historial con lo único que necesita la derivación de kilometraje
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub vehicle_id: String,
    /// Fecha ISO (YYYY-MM-DD); una fecha no parseable excluye la entrada
    pub date: Option<String>,
    pub mileage: Option<i64>,
}

/// Muestra de kilometraje derivada - no se persiste
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleMileageSample {
    pub vehicle_id: String,
    pub mileage: i64,
    pub observed_at: NaiveDate,
}
