use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use carnet_auto::config::database::create_pool;
use carnet_auto::config::environment::EnvironmentConfig;
use carnet_auto::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use carnet_auto::routes;
use carnet_auto::services::push_service::{NotificationSender, PushGatewaySender};
use carnet_auto::services::reminder_scheduler::ReminderScheduler;
use carnet_auto::state::AppState;
use carnet_auto::store::{KeyValueStore, MemoryKvStore, RedisKvStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env();

    // Configurar logging
    let level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚗 Carnet Auto - Recordatorios de mantenimiento");
    info!("===============================================");

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Inicializar el almacén clave-valor (Redis, o memoria si no hay URL)
    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(redis_url) => match RedisKvStore::new(redis_url).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                error!("❌ Error conectando a Redis: {}", e);
                return Err(anyhow::anyhow!("Error de Redis: {}", e));
            }
        },
        None => {
            info!("⚠️ REDIS_URL no configurada, usando almacén en memoria");
            Arc::new(MemoryKvStore::new())
        }
    };

    let sender: Arc<dyn NotificationSender> = Arc::new(PushGatewaySender::new(&config));

    let app_state = AppState::new(pool, config.clone(), store, sender);

    // Scheduler periódico de recordatorios: una pasada inmediata y luego
    // una cada intervalo configurado
    let scheduler = ReminderScheduler::from_state(&app_state);
    let interval_hours = config.reminder_interval_hours;
    tokio::spawn(async move {
        scheduler.run_forever(interval_hours).await;
    });

    // CORS: orígenes explícitos si están configurados, permisivo si no
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    // Crear router de la API
    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/settings", routes::settings_routes::create_settings_router())
        .nest("/api/reminders", routes::reminder_routes::create_reminder_router())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("⚙️ Endpoints - Ajustes:");
    info!("   GET  /api/settings/:user_id - Obtener ajustes resueltos");
    info!("   PUT  /api/settings/:user_id - Guardar ajustes");
    info!("🔔 Endpoints - Recordatorios:");
    info!("   POST /api/reminders/check/:user_id - Evaluar recordatorios ahora");
    info!("⏰ Pasada automática cada {} horas", interval_hours);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de health check
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "carnet-auto",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
