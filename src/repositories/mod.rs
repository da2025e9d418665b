//! Repositorios de acceso a datos
//!
//! Cada repositorio es dueño de un `PgPool` y encapsula las queries de
//! su tabla. Los queries usan la API runtime de sqlx (`query_as`).

pub mod material_repository;
pub mod transaction_repository;
pub mod user_repository;
pub mod vehicle_repository;
