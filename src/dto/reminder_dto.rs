use serde::Serialize;

use crate::models::notification::NotificationEvent;

// Response de una pasada manual de recordatorios
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRemindersResponse {
    pub notified_count: usize,
    pub notifications: Vec<NotificationEvent>,
}

impl CheckRemindersResponse {
    pub fn from_events(notifications: Vec<NotificationEvent>) -> Self {
        Self {
            notified_count: notifications.len(),
            notifications,
        }
    }
}
