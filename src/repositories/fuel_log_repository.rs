use crate::models::history::HistoryEntry;
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct FuelLogRepository {
    pool: PgPool,
}

impl FuelLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_history_by_user(&self, user_id: &str) -> Result<Vec<HistoryEntry>, AppError> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            "SELECT vehicle_id, date, mileage FROM fuel_logs WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
