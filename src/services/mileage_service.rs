//! Derivación de kilometraje actual
//!
//! No existe un odómetro autoritativo por vehículo: la aplicación escanea el
//! historial completo (mantenimientos, reparaciones y cargas de combustible)
//! y se queda, por vehículo, con la muestra de fecha más reciente. Entradas
//! con kilometraje no positivo o fecha no parseable quedan excluidas.

use std::collections::HashMap;

use crate::models::history::{HistoryEntry, VehicleMileageSample};
use crate::utils::validation::parse_iso_date;

/// Derivar la muestra de kilometraje más reciente por vehículo a partir de
/// las tres colecciones de historial ya cargadas. Función pura sobre
/// snapshots en memoria; el fetching es responsabilidad del caller.
pub fn derive_latest_samples(
    maintenance: &[HistoryEntry],
    repairs: &[HistoryEntry],
    fuel_logs: &[HistoryEntry],
) -> Vec<VehicleMileageSample> {
    let mut latest: HashMap<String, VehicleMileageSample> = HashMap::new();

    for entry in maintenance.iter().chain(repairs).chain(fuel_logs) {
        let mileage = match entry.mileage {
            Some(km) if km > 0 => km,
            _ => continue,
        };
        let observed_at = match entry.date.as_deref().and_then(parse_iso_date) {
            Some(date) => date,
            None => continue,
        };

        let sample = VehicleMileageSample {
            vehicle_id: entry.vehicle_id.clone(),
            mileage,
            observed_at,
        };

        match latest.get(&entry.vehicle_id) {
            Some(current) if current.observed_at >= observed_at => {}
            _ => {
                latest.insert(entry.vehicle_id.clone(), sample);
            }
        }
    }

    let mut samples: Vec<VehicleMileageSample> = latest.into_values().collect();
    samples.sort_by(|a, b| a.vehicle_id.cmp(&b.vehicle_id));
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(vehicle_id: &str, date: Option<&str>, mileage: Option<i64>) -> HistoryEntry {
        HistoryEntry {
            vehicle_id: vehicle_id.to_string(),
            date: date.map(|d| d.to_string()),
            mileage,
        }
    }

    #[test]
    fn test_keeps_most_recent_sample_per_vehicle() {
        let maintenance = vec![entry("v1", Some("2026-01-10"), Some(48000))];
        let repairs = vec![entry("v1", Some("2026-03-02"), Some(48900))];
        let fuel = vec![
            entry("v1", Some("2026-02-20"), Some(48500)),
            entry("v2", Some("2026-02-01"), Some(120000)),
        ];

        let samples = derive_latest_samples(&maintenance, &repairs, &fuel);

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].vehicle_id, "v1");
        assert_eq!(samples[0].mileage, 48900);
        assert_eq!(
            samples[0].observed_at,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
        assert_eq!(samples[1].vehicle_id, "v2");
        assert_eq!(samples[1].mileage, 120000);
    }

    #[test]
    fn test_excludes_invalid_entries() {
        let maintenance = vec![
            entry("v1", Some("not-a-date"), Some(50000)),
            entry("v1", None, Some(51000)),
            entry("v1", Some("2026-01-01"), Some(0)),
            entry("v1", Some("2026-01-01"), Some(-5)),
            entry("v1", Some("2026-01-01"), None),
        ];

        let samples = derive_latest_samples(&maintenance, &[], &[]);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_tie_keeps_first_seen_sample() {
        let repairs = vec![entry("v1", Some("2026-01-15"), Some(40000))];
        let fuel = vec![entry("v1", Some("2026-01-15"), Some(40100))];

        let samples = derive_latest_samples(&[], &repairs, &fuel);
        assert_eq!(samples[0].mileage, 40000);
    }
}
