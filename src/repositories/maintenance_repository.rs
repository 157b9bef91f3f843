use crate::models::history::HistoryEntry;
use crate::models::maintenance::MaintenanceTask;
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<MaintenanceTask>, AppError> {
        let tasks = sqlx::query_as::<_, MaintenanceTask>(
            r#"
            SELECT id, vehicle_id, task, next_due_date, next_due_mileage
            FROM maintenance_tasks
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn find_history_by_user(&self, user_id: &str) -> Result<Vec<HistoryEntry>, AppError> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            "SELECT vehicle_id, date, mileage FROM maintenance_tasks WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn list_user_ids(&self) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT user_id FROM maintenance_tasks ORDER BY user_id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(user_id,)| user_id).collect())
    }
}
