use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::settings::{AppSettings, VignetteEntry};
use crate::utils::validation::validate_amount;

// Envelope genérico de respuesta de la API
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

// Request para guardar los ajustes completos de un usuario
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsRequest {
    #[validate(custom = "validate_amount")]
    pub price_essence: Decimal,

    #[validate(custom = "validate_amount")]
    pub price_diesel: Decimal,

    #[validate(custom = "validate_amount")]
    pub cost_visite_technique: Decimal,

    #[validate]
    pub vignette_essence: Vec<VignetteEntryDto>,

    #[validate]
    pub vignette_diesel: Vec<VignetteEntryDto>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VignetteEntryDto {
    #[validate(length(min = 1, max = 10))]
    pub range: String,

    #[validate(custom = "validate_amount")]
    pub cost: Decimal,
}

impl From<SaveSettingsRequest> for AppSettings {
    fn from(request: SaveSettingsRequest) -> Self {
        Self {
            price_essence: request.price_essence,
            price_diesel: request.price_diesel,
            cost_visite_technique: request.cost_visite_technique,
            vignette_essence: request
                .vignette_essence
                .into_iter()
                .map(|e| VignetteEntry {
                    range: e.range,
                    cost: e.cost,
                })
                .collect(),
            vignette_diesel: request
                .vignette_diesel
                .into_iter()
                .map(|e| VignetteEntry {
                    range: e.range,
                    cost: e.cost,
                })
                .collect(),
        }
    }
}
