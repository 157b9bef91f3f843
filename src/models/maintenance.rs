//! Modelo de MaintenanceTask
//!
//! Este módulo contiene la tarea de mantenimiento tal como la consume el
//! recordatorio de vencimientos. Las fechas se guardan como string ISO sin
//! componente horario, igual que las escribió la aplicación original.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Única tarea con recordatorio por kilometraje; el resto se evalúa por fecha
pub const TASK_VIDANGE: &str = "Vidange";

/// Tarea de mantenimiento - subconjunto relevante para el notificador
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    pub id: String,
    pub vehicle_id: String,
    pub task: String,
    /// Fecha de vencimiento ISO (YYYY-MM-DD), sin hora
    pub next_due_date: Option<String>,
    /// Kilometraje de vencimiento; solo aplica a la vidange
    pub next_due_mileage: Option<i64>,
}

impl MaintenanceTask {
    /// La rama por kilometraje aplica solo a la vidange con kilometraje > 0
    pub fn has_mileage_deadline(&self) -> bool {
        self.task == TASK_VIDANGE && self.next_due_mileage.map_or(false, |km| km > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, mileage: Option<i64>) -> MaintenanceTask {
        MaintenanceTask {
            id: "t1".to_string(),
            vehicle_id: "v1".to_string(),
            task: name.to_string(),
            next_due_date: None,
            next_due_mileage: mileage,
        }
    }

    #[test]
    fn test_mileage_deadline_only_for_vidange() {
        assert!(task(TASK_VIDANGE, Some(50000)).has_mileage_deadline());
        assert!(!task(TASK_VIDANGE, Some(0)).has_mileage_deadline());
        assert!(!task(TASK_VIDANGE, None).has_mileage_deadline());
        assert!(!task("Vignette", Some(50000)).has_mileage_deadline());
    }
}
