//! Servicios de dominio
//!
//! Lógica de negocio que no toca la base de datos directamente.

pub mod analytics_service;
