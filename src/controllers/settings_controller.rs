use std::sync::Arc;
use validator::Validate;

use crate::dto::settings_dto::{ApiResponse, SaveSettingsRequest};
use crate::models::settings::AppSettings;
use crate::services::settings_service::SettingsService;
use crate::store::KeyValueStore;
use crate::utils::errors::AppError;

pub struct SettingsController {
    service: SettingsService,
}

impl SettingsController {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            service: SettingsService::new(store),
        }
    }

    /// Ajustes resueltos de un usuario; un blob parcial o ausente produce
    /// los defaults mergeados, nunca un error
    pub async fn get(&self, user_id: &str) -> Result<ApiResponse<AppSettings>, AppError> {
        if user_id.trim().is_empty() {
            return Err(AppError::BadRequest("El usuario es requerido".to_string()));
        }

        let settings = self.service.load(user_id).await;
        Ok(ApiResponse::success(settings))
    }

    /// Sobrescritura íntegra de los ajustes de un usuario
    pub async fn save(
        &self,
        user_id: &str,
        request: SaveSettingsRequest,
    ) -> Result<ApiResponse<AppSettings>, AppError> {
        if user_id.trim().is_empty() {
            return Err(AppError::BadRequest("El usuario es requerido".to_string()));
        }

        request.validate()?;

        let settings: AppSettings = request.into();
        self.service.save(user_id, &settings).await?;

        Ok(ApiResponse::success_with_message(
            settings,
            "Ajustes guardados exitosamente".to_string(),
        ))
    }
}
