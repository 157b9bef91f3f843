//! Scheduler de recordatorios
//!
//! Este módulo conduce el notificador de vencimientos: carga snapshots de
//! tareas e historial, deriva el kilometraje por vehículo, ejecuta la pasada
//! pura y persiste el ledger antes de entregar. Las pasadas por usuario se
//! serializan con un guard single-flight: dos lecturas concurrentes del
//! ledger podrían decidir notificar dos veces la misma tarea.

use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::models::notification::{NotificationEvent, NotifiedDeadlineSet};
use crate::repositories::fuel_log_repository::FuelLogRepository;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::repair_repository::RepairRepository;
use crate::services::deadline_service::check_and_notify;
use crate::services::mileage_service::derive_latest_samples;
use crate::services::push_service::NotificationSender;
use crate::state::AppState;
use crate::store::{notified_key, KeyValueStore};
use crate::utils::errors::{AppError, AppResult};

pub struct ReminderScheduler {
    pool: PgPool,
    store: Arc<dyn KeyValueStore>,
    sender: Arc<dyn NotificationSender>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Marcador de pasada en vuelo con liberación por Drop: aunque la pasada se
/// cancele a mitad (el cliente HTTP corta la conexión durante una query), el
/// usuario no queda bloqueado para siempre en el conjunto.
struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
    user_id: String,
}

impl InFlightGuard {
    /// Intentar reclamar la pasada de un usuario; None si ya hay una en vuelo
    fn try_acquire(in_flight: &Arc<Mutex<HashSet<String>>>, user_id: &str) -> Option<Self> {
        let mut set = in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(user_id.to_string()) {
            return None;
        }
        Some(Self {
            in_flight: in_flight.clone(),
            user_id: user_id.to_string(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.user_id);
    }
}

impl ReminderScheduler {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            store: state.store.clone(),
            sender: state.sender.clone(),
            in_flight: state.in_flight.clone(),
        }
    }

    /// Bucle periódico: una pasada inmediata y luego una por intervalo
    pub async fn run_forever(&self, interval_hours: u64) {
        let period = std::time::Duration::from_secs(interval_hours * 3600);
        let mut ticker = tokio::time::interval(period);

        loop {
            ticker.tick().await;
            if let Err(e) = self.run_all().await {
                log::error!("❌ Error en la pasada de recordatorios: {}", e);
            }
        }
    }

    /// Ejecutar una pasada para todos los usuarios con tareas registradas
    pub async fn run_all(&self) -> AppResult<()> {
        let repository = MaintenanceRepository::new(self.pool.clone());
        let user_ids = repository.list_user_ids().await?;

        log::info!("⏰ Pasada de recordatorios para {} usuarios", user_ids.len());

        for user_id in user_ids {
            if let Err(e) = self.run_once(&user_id).await {
                log::error!("❌ Error evaluando recordatorios de {}: {}", user_id, e);
            }
        }

        Ok(())
    }

    /// Ejecutar una pasada para un usuario. Si ya hay otra en vuelo para el
    /// mismo usuario, esta retorna vacía sin evaluar nada.
    pub async fn run_once(&self, user_id: &str) -> AppResult<Vec<NotificationEvent>> {
        let _guard = match InFlightGuard::try_acquire(&self.in_flight, user_id) {
            Some(guard) => guard,
            None => {
                log::warn!("⏳ Pasada ya en vuelo para {}, omitiendo", user_id);
                return Ok(Vec::new());
            }
        };

        self.run_once_inner(user_id).await
    }

    async fn run_once_inner(&self, user_id: &str) -> AppResult<Vec<NotificationEvent>> {
        let maintenance_repo = MaintenanceRepository::new(self.pool.clone());
        let repair_repo = RepairRepository::new(self.pool.clone());
        let fuel_repo = FuelLogRepository::new(self.pool.clone());

        let tasks = maintenance_repo.find_by_user(user_id).await?;
        let maintenance_history = maintenance_repo.find_history_by_user(user_id).await?;
        let repair_history = repair_repo.find_history_by_user(user_id).await?;
        let fuel_history = fuel_repo.find_history_by_user(user_id).await?;

        let samples = derive_latest_samples(&maintenance_history, &repair_history, &fuel_history);
        let notified = load_notified_set(self.store.as_ref(), user_id).await;

        let today = Utc::now().date_naive();
        let outcome = check_and_notify(&tasks, &samples, &notified, today);

        if outcome.to_notify.is_empty() {
            log::debug!("📭 Sin recordatorios pendientes para {}", user_id);
            return Ok(Vec::new());
        }

        // El ledger se persiste antes de entregar: un reintento tras un fallo
        // de entrega no debe duplicar notificaciones
        persist_notified_set(self.store.as_ref(), user_id, &outcome.updated_notified_set).await?;

        for event in &outcome.to_notify {
            self.sender.deliver(user_id, event).await;
        }

        log::info!(
            "🔔 {} recordatorios emitidos para {}",
            outcome.to_notify.len(),
            user_id
        );

        Ok(outcome.to_notify)
    }
}

/// Cargar el ledger de notificados; un blob ausente o malformado es un
/// ledger vacío (fail-soft)
pub async fn load_notified_set(store: &dyn KeyValueStore, user_id: &str) -> NotifiedDeadlineSet {
    let raw = match store.get_raw(&notified_key(user_id)).await {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("⚠️ Error leyendo ledger de {}: {}", user_id, e);
            None
        }
    };

    raw.and_then(|raw| serde_json::from_str::<NotifiedDeadlineSet>(&raw).ok())
        .unwrap_or_default()
}

/// Persistir el ledger de notificados de forma íntegra
pub async fn persist_notified_set(
    store: &dyn KeyValueStore,
    user_id: &str,
    notified: &NotifiedDeadlineSet,
) -> AppResult<()> {
    let serialized = serde_json::to_string(notified)
        .map_err(|e| AppError::Internal(format!("Error serializando ledger: {}", e)))?;

    store
        .put_raw(&notified_key(user_id), &serialized)
        .await
        .map_err(|e| AppError::Storage(format!("Error guardando ledger: {}", e)))
}
