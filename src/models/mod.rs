//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos del carnet de mantenimiento:
//! ajustes de la aplicación, tareas de mantenimiento, historial y notificaciones.

pub mod settings;
pub mod maintenance;
pub mod history;
pub mod notification;
