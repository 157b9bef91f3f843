//! Notificador de vencimientos
//!
//! Este módulo decide qué tareas de mantenimiento han entrado en ventana de
//! recordatorio. Es una función pura sobre snapshots en memoria: el fetching,
//! la persistencia del ledger y la entrega son responsabilidad del caller.
//!
//! Dos ramas excluyentes por tarea:
//! - kilometraje: solo la vidange con `next_due_mileage > 0`; dispara cuando
//!   quedan 2000 km o menos, incluido ya pasado de kilometraje (negativo);
//! - fecha: dispara cuando el vencimiento cae entre hoy y hoy + 7 días,
//!   ambos inclusive; una fecha ya pasada no dispara.
//! La asimetría entre ramas ante vencimientos pasados es comportamiento
//! heredado de la aplicación original y se conserva por rama.

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

use crate::models::history::VehicleMileageSample;
use crate::models::maintenance::MaintenanceTask;
use crate::models::notification::{CheckOutcome, NotificationEvent, NotifiedDeadlineSet};
use crate::utils::validation::parse_iso_date;

/// Umbral de recordatorio por kilometraje restante
pub const REMINDER_KM_THRESHOLD: i64 = 2000;

/// Umbral de recordatorio por días hasta el vencimiento (inclusive)
pub const REMINDER_DAYS_THRESHOLD: i64 = 7;

/// Evaluar todas las tareas en orden de entrada y decidir cuáles notificar.
/// Una tarea ya presente en el ledger no vuelve a notificarse nunca.
pub fn check_and_notify(
    tasks: &[MaintenanceTask],
    samples: &[VehicleMileageSample],
    notified: &NotifiedDeadlineSet,
    today: NaiveDate,
) -> CheckOutcome {
    let mileage_by_vehicle: HashMap<&str, i64> = samples
        .iter()
        .map(|s| (s.vehicle_id.as_str(), s.mileage))
        .collect();

    let mut to_notify = Vec::new();
    let mut updated = notified.clone();

    for task in tasks {
        // Dedup permanente: marcada una vez, nunca más
        if updated.contains_key(&task.id) {
            continue;
        }

        if task.has_mileage_deadline() {
            // Sin muestra de kilometraje la tarea no se puede evaluar;
            // no cae a la rama por fecha
            let current = match mileage_by_vehicle.get(task.vehicle_id.as_str()) {
                Some(km) => *km,
                None => continue,
            };

            let km_remaining = task.next_due_mileage.unwrap_or(0) - current;
            if km_remaining <= REMINDER_KM_THRESHOLD {
                to_notify.push(mileage_event(task, km_remaining));
                updated.insert(task.id.clone(), true);
            }
        } else if let Some(due) = task.next_due_date.as_deref().and_then(parse_iso_date) {
            let window_end = today + Duration::days(REMINDER_DAYS_THRESHOLD);
            if due >= today && due <= window_end {
                to_notify.push(date_event(task, due));
                updated.insert(task.id.clone(), true);
            }
        }
    }

    CheckOutcome {
        to_notify,
        updated_notified_set: updated,
    }
}

fn mileage_event(task: &MaintenanceTask, km_remaining: i64) -> NotificationEvent {
    NotificationEvent {
        task_id: task.id.clone(),
        title: "Rappel entretien".to_string(),
        body: format!(
            "Vidange imminente : environ {} km restants",
            format_km(km_remaining)
        ),
    }
}

fn date_event(task: &MaintenanceTask, due: NaiveDate) -> NotificationEvent {
    NotificationEvent {
        task_id: task.id.clone(),
        title: "Rappel entretien".to_string(),
        body: format!(
            "Entretien à prévoir : {} avant le {}",
            task.task,
            due.format("%d/%m/%Y")
        ),
    }
}

/// Formatear kilómetros con separador de miles (espacio, agrupación francesa)
fn format_km(value: i64) -> String {
    let digits = (value as i128).abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    fn vidange(id: &str, vehicle_id: &str, next_due_mileage: i64) -> MaintenanceTask {
        MaintenanceTask {
            id: id.to_string(),
            vehicle_id: vehicle_id.to_string(),
            task: "Vidange".to_string(),
            next_due_date: None,
            next_due_mileage: Some(next_due_mileage),
        }
    }

    fn dated(id: &str, task: &str, due: &str) -> MaintenanceTask {
        MaintenanceTask {
            id: id.to_string(),
            vehicle_id: "v1".to_string(),
            task: task.to_string(),
            next_due_date: Some(due.to_string()),
            next_due_mileage: None,
        }
    }

    fn sample(vehicle_id: &str, mileage: i64) -> VehicleMileageSample {
        VehicleMileageSample {
            vehicle_id: vehicle_id.to_string(),
            mileage,
            observed_at: today(),
        }
    }

    #[test]
    fn test_mileage_threshold_boundary() {
        let samples = vec![sample("v1", 48000)];
        let empty = NotifiedDeadlineSet::new();

        // 2000 km restantes exactos: dispara
        let outcome = check_and_notify(&[vidange("t1", "v1", 50000)], &samples, &empty, today());
        assert_eq!(outcome.to_notify.len(), 1);

        // 2001 km restantes: no dispara
        let outcome = check_and_notify(&[vidange("t1", "v1", 50001)], &samples, &empty, today());
        assert!(outcome.to_notify.is_empty());
        assert!(!outcome.updated_notified_set.contains_key("t1"));

        // Kilometraje ya superado (-500): dispara igualmente
        let outcome = check_and_notify(&[vidange("t1", "v1", 47500)], &samples, &empty, today());
        assert_eq!(outcome.to_notify.len(), 1);
        assert!(outcome.to_notify[0].body.contains("-500"));
    }

    #[test]
    fn test_mileage_branch_without_sample_skips_task() {
        let mut task = vidange("t1", "v1", 50000);
        // Aunque tenga fecha, la vidange con kilometraje no cae a la rama por fecha
        task.next_due_date = Some("2026-08-30".to_string());

        let outcome = check_and_notify(&[task], &[], &NotifiedDeadlineSet::new(), today());

        assert!(outcome.to_notify.is_empty());
        assert!(outcome.updated_notified_set.is_empty());
    }

    #[test]
    fn test_date_threshold_boundary() {
        let empty = NotifiedDeadlineSet::new();

        // Vence hoy: dispara
        let outcome = check_and_notify(&[dated("t1", "Vignette", "2026-08-30")], &[], &empty, today());
        assert_eq!(outcome.to_notify.len(), 1);

        // Hoy + 7: dispara (inclusivo)
        let outcome = check_and_notify(&[dated("t1", "Vignette", "2026-09-06")], &[], &empty, today());
        assert_eq!(outcome.to_notify.len(), 1);

        // Hoy + 8: no dispara
        let outcome = check_and_notify(&[dated("t1", "Vignette", "2026-09-07")], &[], &empty, today());
        assert!(outcome.to_notify.is_empty());

        // Ayer: la rama por fecha nunca avisa de vencimientos pasados
        let outcome = check_and_notify(&[dated("t1", "Vignette", "2026-08-29")], &[], &empty, today());
        assert!(outcome.to_notify.is_empty());
    }

    #[test]
    fn test_at_most_once_across_calls() {
        let samples = vec![sample("v1", 48200)];
        let tasks = vec![vidange("t1", "v1", 50000)];

        let first = check_and_notify(&tasks, &samples, &NotifiedDeadlineSet::new(), today());
        assert_eq!(first.to_notify.len(), 1);
        assert_eq!(first.updated_notified_set.get("t1"), Some(&true));

        // Segunda pasada con el ledger acumulado: nada que notificar
        let second = check_and_notify(&tasks, &samples, &first.updated_notified_set, today());
        assert!(second.to_notify.is_empty());
        assert_eq!(second.updated_notified_set, first.updated_notified_set);
    }

    #[test]
    fn test_ledger_survives_task_edits() {
        let mut ledger = NotifiedDeadlineSet::new();
        ledger.insert("t1".to_string(), true);

        // La tarea volvió a ventana tras una edición; el ledger manda igualmente
        let outcome = check_and_notify(
            &[dated("t1", "Visite technique", "2026-09-01")],
            &[],
            &ledger,
            today(),
        );
        assert!(outcome.to_notify.is_empty());
    }

    #[test]
    fn test_task_with_no_deadline_is_untouched() {
        let task = MaintenanceTask {
            id: "t1".to_string(),
            vehicle_id: "v1".to_string(),
            task: "Paiement Assurance".to_string(),
            next_due_date: None,
            next_due_mileage: None,
        };

        let outcome = check_and_notify(&[task], &[], &NotifiedDeadlineSet::new(), today());
        assert!(outcome.to_notify.is_empty());
        assert!(outcome.updated_notified_set.is_empty());
    }

    #[test]
    fn test_unparseable_due_date_is_ignored() {
        let outcome = check_and_notify(
            &[dated("t1", "Vignette", "30/08/2026")],
            &[],
            &NotifiedDeadlineSet::new(),
            today(),
        );
        assert!(outcome.to_notify.is_empty());
    }

    #[test]
    fn test_events_preserve_input_order() {
        let tasks = vec![
            dated("t2", "Vignette", "2026-09-01"),
            vidange("t1", "v1", 49000),
        ];
        let samples = vec![sample("v1", 48200)];

        let outcome = check_and_notify(&tasks, &samples, &NotifiedDeadlineSet::new(), today());
        let ids: Vec<&str> = outcome.to_notify.iter().map(|e| e.task_id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
    }

    #[test]
    fn test_event_bodies() {
        let samples = vec![sample("v1", 48200)];
        let outcome = check_and_notify(
            &[vidange("t1", "v1", 50000)],
            &samples,
            &NotifiedDeadlineSet::new(),
            today(),
        );
        assert_eq!(outcome.to_notify[0].title, "Rappel entretien");
        assert_eq!(
            outcome.to_notify[0].body,
            "Vidange imminente : environ 1 800 km restants"
        );

        let outcome = check_and_notify(
            &[dated("t2", "Visite technique", "2026-09-03")],
            &[],
            &NotifiedDeadlineSet::new(),
            today(),
        );
        assert_eq!(
            outcome.to_notify[0].body,
            "Entretien à prévoir : Visite technique avant le 03/09/2026"
        );
    }

    #[test]
    fn test_format_km_grouping() {
        assert_eq!(format_km(500), "500");
        assert_eq!(format_km(1800), "1 800");
        assert_eq!(format_km(123456), "123 456");
        assert_eq!(format_km(-1500), "-1 500");
        assert_eq!(format_km(0), "0");
    }
}
