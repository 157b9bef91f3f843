use anyhow::Result;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use tracing::{debug, error, info, warn};

use super::KeyValueStore;

/// Almacén clave-valor sobre Redis con connection pooling y operaciones async
#[derive(Clone)]
pub struct RedisKvStore {
    manager: ConnectionManager,
}

impl RedisKvStore {
    /// Crear nuevo almacén Redis
    pub async fn new(redis_url: &str) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", redis_url);

        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager })
    }
}

#[async_trait::async_trait]
impl KeyValueStore for RedisKvStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!("📥 Blob encontrado para clave: {}", key);
                Ok(Some(value))
            }
            Ok(None) => {
                debug!("❌ Blob ausente para clave: {}", key);
                Ok(None)
            }
            Err(e) => {
                // Lectura fail-soft: una clave ilegible se trata como ausente
                warn!("⚠️ Error leyendo clave {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.manager.clone();

        let result: RedisResult<()> = conn.set(key, value).await;

        match result {
            Ok(()) => {
                debug!("💾 Blob guardado para clave: {}", key);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error guardando clave {}: {}", key, e);
                Err(anyhow::anyhow!("Error de Redis: {}", e))
            }
        }
    }
}
