//! Carnet Auto - backend de mantenimiento de vehículos
//!
//! Núcleo: resolución de ajustes contra defaults y notificador local de
//! vencimientos de mantenimiento (por fecha o por kilometraje), con ledger
//! permanente de deduplicación.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;
