//! Controllers de la API
//!
//! Orquestan validación, repositorios y servicios. Los handlers de
//! routes/ los construyen por request con el pool del estado.

pub mod analytics_controller;
pub mod auth_controller;
pub mod finance_controller;
pub mod material_controller;
pub mod vehicle_controller;
