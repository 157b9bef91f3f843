//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: resolución de
//! ajustes, derivación de kilometraje, el notificador de vencimientos, el
//! scheduler periódico y la entrega de notificaciones push.

pub mod settings_service;
pub mod mileage_service;
pub mod deadline_service;
pub mod reminder_scheduler;
pub mod push_service;

pub use settings_service::*;
pub use mileage_service::*;
pub use deadline_service::*;
pub use reminder_scheduler::*;
pub use push_service::*;
