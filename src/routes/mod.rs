pub mod analytics_routes;
pub mod auth_routes;
pub mod finance_routes;
pub mod material_routes;
pub mod vehicle_routes;
