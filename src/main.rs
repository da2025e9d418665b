mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod security;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use controllers::auth_controller::AuthController;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Fleet Dashboard API");
    info!("======================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let app_state = AppState::new(pool, config);

    // Crear el usuario admin inicial si la tabla está vacía
    let auth_controller = AuthController::new(
        app_state.pool.clone(),
        app_state.config.clone(),
        app_state.login_limiter.clone(),
    );
    if let Err(e) = auth_controller.seed_default_admin().await {
        error!("❌ Error creando el admin inicial: {}", e);
    }

    // Rutas protegidas por JWT
    let protected = Router::new()
        .nest("/api/auth", routes::auth_routes::create_protected_auth_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/finance", routes::finance_routes::create_finance_router())
        .nest("/api/material", routes::material_routes::create_material_router())
        .nest("/api/analytics", routes::analytics_routes::create_analytics_router())
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::auth_middleware,
        ));

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .merge(protected)
        .layer(cors_middleware())
        .with_state(app_state.clone());

    let addr: SocketAddr = format!("0.0.0.0:{}", app_state.config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/login - Login (con rate limiting)");
    info!("   POST /api/auth/register - Registrar usuario (admin)");
    info!("   POST /api/auth/change-password - Cambiar contraseña");
    info!("   GET  /api/auth/users - Listar usuarios (admin)");
    info!("   DELETE /api/auth/users/:id - Eliminar usuario (admin)");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle - Listar vehículos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo");
    info!("💰 Endpoints - Finance:");
    info!("   POST /api/finance - Registrar transacción");
    info!("   GET  /api/finance - Listar transacciones");
    info!("   GET  /api/finance/:id - Obtener transacción");
    info!("   DELETE /api/finance/:id - Eliminar transacción");
    info!("🏗️ Endpoints - Material:");
    info!("   POST /api/material - Registrar movimiento");
    info!("   GET  /api/material - Listar movimientos");
    info!("   GET  /api/material/:id - Obtener movimiento");
    info!("   PUT  /api/material/:id - Actualizar movimiento");
    info!("   DELETE /api/material/:id - Eliminar movimiento");
    info!("📊 Endpoints - Analytics:");
    info!("   GET  /api/analytics/profitability?period=week|month|year - Rentabilidad por vehículo");
    info!("   GET  /api/analytics/notifications - Vencimientos de la flota");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                anyhow::Error::from(e)
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-dashboard",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
