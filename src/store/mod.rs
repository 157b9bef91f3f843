//! Almacenamiento clave-valor
//!
//! Este módulo define el puerto de almacenamiento de blobs persistidos
//! (ajustes y ledger de notificados) y sus implementaciones: Redis en
//! producción y memoria para tests o despliegues sin Redis.

use anyhow::Result;

pub mod memory_store;
pub mod redis_store;

pub use memory_store::MemoryKvStore;
pub use redis_store::RedisKvStore;

/// Puerto de almacenamiento clave-valor para blobs JSON
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Leer el blob crudo de una clave; None si la clave no existe
    async fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Sobrescribir el blob de una clave de forma íntegra
    async fn put_raw(&self, key: &str, value: &str) -> Result<()>;
}

/// Generar clave con prefijo de la aplicación
fn make_key(prefix: &str, identifier: &str) -> String {
    format!("carnet_auto:{}:{}", prefix, identifier)
}

/// Clave del blob de ajustes de un usuario
pub fn settings_key(user_id: &str) -> String {
    make_key("settings", user_id)
}

/// Clave del ledger de vencimientos notificados de un usuario
pub fn notified_key(user_id: &str) -> String {
    make_key("notified", user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced_per_user() {
        assert_eq!(settings_key("u1"), "carnet_auto:settings:u1");
        assert_eq!(notified_key("u1"), "carnet_auto:notified:u1");
        assert_ne!(settings_key("u1"), settings_key("u2"));
    }
}
