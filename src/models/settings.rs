//! Modelo de AppSettings
//!
//! Este módulo contiene los ajustes configurables por el usuario (precios de
//! combustible, coste de la visite technique, tablas de vignette) y los valores
//! por defecto contra los que se resuelve cualquier blob persistido parcial.

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

/// Entrada de la tabla de vignette, indexada por rango de potencia fiscal (CV)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VignetteEntry {
    pub range: String,
    pub cost: Decimal,
}

impl VignetteEntry {
    pub fn new(range: &str, cost: Decimal) -> Self {
        Self {
            range: range.to_string(),
            cost,
        }
    }
}

/// Ajustes resueltos de la aplicación - nunca tiene campos indefinidos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub price_essence: Decimal,
    pub price_diesel: Decimal,
    pub cost_visite_technique: Decimal,
    pub vignette_essence: Vec<VignetteEntry>,
    pub vignette_diesel: Vec<VignetteEntry>,
}

/// Blob persistido parcial - cada campo puede faltar o estar malformado.
/// Un campo con tipo incorrecto se trata como ausente, nunca como error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialAppSettings {
    #[serde(default, deserialize_with = "lenient")]
    pub price_essence: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    pub price_diesel: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    pub cost_visite_technique: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    pub vignette_essence: Option<Vec<VignetteEntry>>,
    #[serde(default, deserialize_with = "lenient")]
    pub vignette_diesel: Option<Vec<VignetteEntry>>,
}

/// Deserializar un campo tolerando tipos incorrectos: el valor se lee como
/// JSON genérico y, si no convierte al tipo esperado, el campo queda en None.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

lazy_static! {
    /// Ajustes por defecto de fábrica. El conjunto y el orden de los rangos de
    /// estas tablas definen el conjunto y el orden de cualquier salida resuelta.
    pub static ref DEFAULT_SETTINGS: AppSettings = AppSettings {
        price_essence: Decimal::new(2525, 3),
        price_diesel: Decimal::new(2205, 3),
        cost_visite_technique: Decimal::new(35, 0),
        vignette_essence: vec![
            VignetteEntry::new("4", Decimal::new(60, 0)),
            VignetteEntry::new("5-7", Decimal::new(130, 0)),
            VignetteEntry::new("8-9", Decimal::new(180, 0)),
            VignetteEntry::new("10-11", Decimal::new(230, 0)),
            VignetteEntry::new("12-13", Decimal::new(1100, 0)),
            VignetteEntry::new("14-15", Decimal::new(1600, 0)),
            VignetteEntry::new("16+", Decimal::new(2100, 0)),
        ],
        vignette_diesel: vec![
            VignetteEntry::new("4", Decimal::new(110, 0)),
            VignetteEntry::new("5-7", Decimal::new(250, 0)),
            VignetteEntry::new("8-9", Decimal::new(370, 0)),
            VignetteEntry::new("10-11", Decimal::new(500, 0)),
            VignetteEntry::new("12-13", Decimal::new(1600, 0)),
            VignetteEntry::new("14-15", Decimal::new(2100, 0)),
            VignetteEntry::new("16+", Decimal::new(2600, 0)),
        ],
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_tolerates_wrong_types() {
        let raw = r#"{"priceEssence": "2.8", "priceDiesel": [1, 2], "vignetteEssence": "oops"}"#;
        let partial: PartialAppSettings = serde_json::from_str(raw).unwrap();

        assert_eq!(partial.price_essence, Some(Decimal::new(28, 1)));
        assert_eq!(partial.price_diesel, None);
        assert!(partial.vignette_essence.is_none());
    }

    #[test]
    fn test_default_tables_share_range_keys() {
        let essence: Vec<&str> = DEFAULT_SETTINGS
            .vignette_essence
            .iter()
            .map(|e| e.range.as_str())
            .collect();
        let diesel: Vec<&str> = DEFAULT_SETTINGS
            .vignette_diesel
            .iter()
            .map(|e| e.range.as_str())
            .collect();

        assert_eq!(essence, diesel);
        assert_eq!(essence.first(), Some(&"4"));
    }
}
