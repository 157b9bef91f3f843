use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};

use crate::controllers::reminder_controller::ReminderController;
use crate::dto::reminder_dto::CheckRemindersResponse;
use crate::dto::settings_dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reminder_router() -> Router<AppState> {
    Router::new().route("/check/:user_id", post(check_reminders))
}

async fn check_reminders(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<CheckRemindersResponse>>, AppError> {
    let controller = ReminderController::new(&state);
    let response = controller.check(&user_id).await?;
    Ok(Json(response))
}
