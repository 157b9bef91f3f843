//! Repositorios de acceso a datos
//!
//! Pass-throughs finos sobre sqlx; sin lógica de negocio.

pub mod maintenance_repository;
pub mod repair_repository;
pub mod fuel_log_repository;
