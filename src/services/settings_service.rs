//! Servicio de ajustes
//!
//! Este módulo resuelve el blob persistido de ajustes contra los valores por
//! defecto. La resolución es un merge por clave: un blob parcial o de un
//! esquema antiguo nunca deja un campo indefinido, y las tablas de vignette
//! resueltas llevan siempre exactamente los rangos de la tabla por defecto,
//! en su orden fijo.

use std::sync::Arc;

use crate::models::settings::{AppSettings, PartialAppSettings, VignetteEntry, DEFAULT_SETTINGS};
use crate::store::{settings_key, KeyValueStore};
use crate::utils::errors::{AppError, AppResult};

/// Resolver ajustes persistidos parciales contra los defaults.
/// Nunca falla: un blob ausente o malformado produce los defaults íntegros.
pub fn resolve(persisted: Option<PartialAppSettings>) -> AppSettings {
    let persisted = match persisted {
        Some(p) => p,
        None => return DEFAULT_SETTINGS.clone(),
    };

    AppSettings {
        price_essence: persisted
            .price_essence
            .unwrap_or(DEFAULT_SETTINGS.price_essence),
        price_diesel: persisted
            .price_diesel
            .unwrap_or(DEFAULT_SETTINGS.price_diesel),
        cost_visite_technique: persisted
            .cost_visite_technique
            .unwrap_or(DEFAULT_SETTINGS.cost_visite_technique),
        vignette_essence: merge_vignette_table(
            &DEFAULT_SETTINGS.vignette_essence,
            persisted.vignette_essence.as_deref(),
        ),
        vignette_diesel: merge_vignette_table(
            &DEFAULT_SETTINGS.vignette_diesel,
            persisted.vignette_diesel.as_deref(),
        ),
    }
}

/// Merge por clave de una tabla de vignette: se itera la tabla por defecto en
/// su orden; un rango persistido que no existe en los defaults se descarta.
fn merge_vignette_table(
    defaults: &[VignetteEntry],
    persisted: Option<&[VignetteEntry]>,
) -> Vec<VignetteEntry> {
    defaults
        .iter()
        .map(|entry| {
            let cost = persisted
                .and_then(|table| table.iter().find(|p| p.range == entry.range))
                .map(|p| p.cost)
                .unwrap_or(entry.cost);
            VignetteEntry {
                range: entry.range.clone(),
                cost,
            }
        })
        .collect()
}

/// Servicio de ajustes sobre el almacén clave-valor
pub struct SettingsService {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Cargar los ajustes resueltos de un usuario.
    /// Un blob ilegible o malformado se trata como ausente (fail-soft).
    pub async fn load(&self, user_id: &str) -> AppSettings {
        let raw = match self.store.get_raw(&settings_key(user_id)).await {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("⚠️ Error leyendo ajustes de {}: {}", user_id, e);
                None
            }
        };

        let persisted = raw.and_then(|raw| {
            serde_json::from_str::<PartialAppSettings>(&raw)
                .map_err(|e| {
                    log::warn!("⚠️ Blob de ajustes malformado para {}: {}", user_id, e);
                    e
                })
                .ok()
        });

        resolve(persisted)
    }

    /// Sobrescribir los ajustes de un usuario de forma íntegra
    pub async fn save(&self, user_id: &str, settings: &AppSettings) -> AppResult<()> {
        let serialized = serde_json::to_string(settings)
            .map_err(|e| AppError::Internal(format!("Error serializando ajustes: {}", e)))?;

        self.store
            .put_raw(&settings_key(user_id), &serialized)
            .await
            .map_err(|e| AppError::Storage(format!("Error guardando ajustes: {}", e)))?;

        log::info!("💾 Ajustes guardados para usuario {}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn partial(raw: &str) -> Option<PartialAppSettings> {
        serde_json::from_str(raw).ok()
    }

    #[test]
    fn test_resolve_none_returns_defaults_verbatim() {
        assert_eq!(resolve(None), DEFAULT_SETTINGS.clone());
    }

    #[test]
    fn test_resolve_empty_blob_returns_defaults() {
        assert_eq!(resolve(partial("{}")), DEFAULT_SETTINGS.clone());
    }

    #[test]
    fn test_scalar_override_keeps_other_defaults() {
        let resolved = resolve(partial(
            r#"{"priceEssence": "3.0", "vignetteEssence": [{"range": "4", "cost": "999"}]}"#,
        ));

        assert_eq!(resolved.price_essence, Decimal::new(30, 1));
        assert_eq!(resolved.price_diesel, DEFAULT_SETTINGS.price_diesel);
        assert_eq!(
            resolved.cost_visite_technique,
            DEFAULT_SETTINGS.cost_visite_technique
        );

        assert_eq!(resolved.vignette_essence[0].range, "4");
        assert_eq!(resolved.vignette_essence[0].cost, Decimal::new(999, 0));
        // El resto de rangos queda en su valor por defecto
        assert_eq!(
            resolved.vignette_essence[1..],
            DEFAULT_SETTINGS.vignette_essence[1..]
        );
        assert_eq!(resolved.vignette_diesel, DEFAULT_SETTINGS.vignette_diesel);
    }

    #[test]
    fn test_unknown_ranges_are_dropped() {
        let resolved = resolve(partial(
            r#"{"vignetteDiesel": [{"range": "99", "cost": "1"}, {"range": "5-7", "cost": "300"}]}"#,
        ));

        let ranges: Vec<&str> = resolved
            .vignette_diesel
            .iter()
            .map(|e| e.range.as_str())
            .collect();
        let default_ranges: Vec<&str> = DEFAULT_SETTINGS
            .vignette_diesel
            .iter()
            .map(|e| e.range.as_str())
            .collect();

        assert_eq!(ranges, default_ranges);
        assert_eq!(resolved.vignette_diesel[1].cost, Decimal::new(300, 0));
    }

    #[test]
    fn test_malformed_fields_fall_back_per_field() {
        let resolved = resolve(partial(
            r#"{"priceEssence": {"nested": true}, "priceDiesel": "2.4"}"#,
        ));

        assert_eq!(resolved.price_essence, DEFAULT_SETTINGS.price_essence);
        assert_eq!(resolved.price_diesel, Decimal::new(24, 1));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let first = resolve(partial(
            r#"{"priceEssence": "3.1", "vignetteEssence": [{"range": "8-9", "cost": "200"}]}"#,
        ));

        let reserialized = serde_json::to_string(&first).unwrap();
        let second = resolve(partial(&reserialized));

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_load_save_round_trip() {
        use crate::store::MemoryKvStore;

        let store = Arc::new(MemoryKvStore::new());
        let service = SettingsService::new(store);

        let mut settings = service.load("u1").await;
        assert_eq!(settings, DEFAULT_SETTINGS.clone());

        settings.price_essence = Decimal::new(28, 1);
        service.save("u1", &settings).await.unwrap();

        let reloaded = service.load("u1").await;
        assert_eq!(reloaded.price_essence, Decimal::new(28, 1));
        assert_eq!(reloaded.vignette_essence, DEFAULT_SETTINGS.vignette_essence);
    }
}
