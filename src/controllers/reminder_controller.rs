use crate::dto::reminder_dto::CheckRemindersResponse;
use crate::dto::settings_dto::ApiResponse;
use crate::services::reminder_scheduler::ReminderScheduler;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct ReminderController {
    scheduler: ReminderScheduler,
}

impl ReminderController {
    pub fn new(state: &AppState) -> Self {
        Self {
            scheduler: ReminderScheduler::from_state(state),
        }
    }

    /// Ejecutar una pasada de recordatorios ahora para un usuario
    pub async fn check(
        &self,
        user_id: &str,
    ) -> Result<ApiResponse<CheckRemindersResponse>, AppError> {
        if user_id.trim().is_empty() {
            return Err(AppError::BadRequest("El usuario es requerido".to_string()));
        }

        let events = self.scheduler.run_once(user_id).await?;

        Ok(ApiResponse::success(CheckRemindersResponse::from_events(
            events,
        )))
    }
}
