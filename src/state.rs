//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::config::environment::EnvironmentConfig;
use crate::services::push_service::NotificationSender;
use crate::store::KeyValueStore;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub sender: Arc<dyn NotificationSender>,
    /// Usuarios con una pasada de recordatorios en vuelo (guard single-flight).
    /// Mutex síncrono: las secciones críticas no cruzan ningún await y el
    /// marcador debe poder liberarse desde un Drop.
    pub in_flight: Arc<Mutex<HashSet<String>>>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        store: Arc<dyn KeyValueStore>,
        sender: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            pool,
            config,
            store,
            sender,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}
