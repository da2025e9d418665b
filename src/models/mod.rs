//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod analytics;
pub mod material;
pub mod transaction;
pub mod user;
pub mod vehicle;
