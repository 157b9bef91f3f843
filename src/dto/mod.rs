//! DTOs de la API
//!
//! Requests y responses de la capa HTTP.

pub mod settings_dto;
pub mod reminder_dto;
