//! Servicio de entrega de notificaciones
//!
//! Este módulo entrega los eventos decididos por el notificador a la pasarela
//! push configurada. La entrega es fire-and-forget: un fallo se registra y no
//! se reintenta; el ledger de notificados ya quedó persistido al decidir.

use async_trait::async_trait;
use serde_json::json;

use crate::config::environment::EnvironmentConfig;
use crate::models::notification::NotificationEvent;

/// Colaborador de entrega de notificaciones
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Entregar un evento a un usuario. Nunca falla hacia el caller.
    async fn deliver(&self, user_id: &str, event: &NotificationEvent);
}

/// Entrega vía pasarela push REST (OneSignal o compatible)
pub struct PushGatewaySender {
    client: reqwest::Client,
    gateway_url: Option<String>,
    api_key: Option<String>,
}

impl PushGatewaySender {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            gateway_url: config.push_gateway_url.clone(),
            api_key: config.push_gateway_key.clone(),
        }
    }
}

#[async_trait]
impl NotificationSender for PushGatewaySender {
    async fn deliver(&self, user_id: &str, event: &NotificationEvent) {
        let url = match &self.gateway_url {
            Some(url) => url.clone(),
            None => {
                log::debug!(
                    "📭 Pasarela push no configurada, descartando evento para {}",
                    user_id
                );
                return;
            }
        };

        let payload = json!({
            "externalUserId": user_id,
            "title": event.title,
            "body": event.body,
        });

        let mut request = self.client.post(&url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                log::info!("📨 Notificación entregada a {}: {}", user_id, event.title);
            }
            Ok(response) => {
                log::error!(
                    "❌ Pasarela push respondió {} para usuario {}",
                    response.status(),
                    user_id
                );
            }
            Err(e) => {
                log::error!("❌ Error entregando notificación a {}: {}", user_id, e);
            }
        }
    }
}
