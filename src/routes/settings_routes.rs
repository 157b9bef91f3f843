use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::controllers::settings_controller::SettingsController;
use crate::dto::settings_dto::{ApiResponse, SaveSettingsRequest};
use crate::models::settings::AppSettings;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_settings_router() -> Router<AppState> {
    Router::new()
        .route("/:user_id", get(get_settings))
        .route("/:user_id", put(save_settings))
}

async fn get_settings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<AppSettings>>, AppError> {
    let controller = SettingsController::new(state.store.clone());
    let response = controller.get(&user_id).await?;
    Ok(Json(response))
}

async fn save_settings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<SaveSettingsRequest>,
) -> Result<Json<ApiResponse<AppSettings>>, AppError> {
    let controller = SettingsController::new(state.store.clone());
    let response = controller.save(&user_id, request).await?;
    Ok(Json(response))
}
