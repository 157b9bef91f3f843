//! Modelos de notificación
//!
//! Este módulo contiene el evento de notificación local y el ledger de
//! vencimientos ya notificados. El ledger es un conjunto permanente: una
//! tarea marcada no vuelve a notificarse nunca, aunque su vencimiento
//! retroceda después de una edición.

use serde::Serialize;
use std::collections::HashMap;

/// Evento de notificación decidido por el núcleo; la entrega es externa
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub task_id: String,
    pub title: String,
    pub body: String,
}

/// Ledger persistido `{taskId: true}` - solo se añade, nunca se poda
pub type NotifiedDeadlineSet = HashMap<String, bool>;

/// Resultado de una pasada del notificador
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub to_notify: Vec<NotificationEvent>,
    pub updated_notified_set: NotifiedDeadlineSet,
}
