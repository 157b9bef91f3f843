//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Intervalo por defecto entre pasadas de recordatorios
const DEFAULT_REMINDER_INTERVAL_HOURS: u64 = 6;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub redis_url: Option<String>,
    pub push_gateway_url: Option<String>,
    pub push_gateway_key: Option<String>,
    pub reminder_interval_hours: u64,
    pub cors_origins: Vec<String>,
}

impl EnvironmentConfig {
    /// Construir la configuración desde variables de entorno
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            redis_url: env::var("REDIS_URL").ok(),
            push_gateway_url: env::var("PUSH_GATEWAY_URL").ok(),
            push_gateway_key: env::var("PUSH_GATEWAY_KEY").ok(),
            // Mínimo una hora: un intervalo cero haría panic al tokio::interval
            reminder_interval_hours: env::var("REMINDER_INTERVAL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REMINDER_INTERVAL_HOURS)
                .max(1),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
