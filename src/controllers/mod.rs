//! Controladores de la API
//!
//! Orquestan validación y servicios para cada recurso HTTP.

pub mod settings_controller;
pub mod reminder_controller;
