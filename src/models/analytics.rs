//! Modelos de Analytics
//!
//! Este módulo contiene los tipos derivados del reporte de rentabilidad
//! por vehículo y de las notificaciones de vencimientos. Ninguno se
//! persiste: se recalculan en cada lectura a partir de los datos actuales.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::vehicle::VehicleStatus;

/// Ventana de tiempo del reporte de rentabilidad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Default for Period {
    fn default() -> Self {
        Period::Month
    }
}

/// Calificación cualitativa de un vehículo para el dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitRating {
    Loss,
    Weak,
    Good,
    Excellent,
}

impl ProfitRating {
    /// Clasifica un vehículo. El orden de los branches importa:
    /// primero pérdida, después margen débil, después margen alto.
    /// Un vehículo sin movimiento (profit 0, margen 0) cae en el
    /// default `Excellent`.
    pub fn classify(profit: f64, margin: f64) -> Self {
        if profit < 0.0 {
            ProfitRating::Loss
        } else if margin > 0.0 && margin < 20.0 {
            ProfitRating::Weak
        } else if margin > 50.0 {
            ProfitRating::Excellent
        } else if profit > 0.0 {
            ProfitRating::Good
        } else {
            ProfitRating::Excellent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfitRating::Loss => "Pérdida",
            ProfitRating::Weak => "Débil",
            ProfitRating::Good => "Bueno",
            ProfitRating::Excellent => "Excelente",
        }
    }
}

/// Estadísticas acumuladas de un vehículo dentro del período
#[derive(Debug, Clone, Serialize)]
pub struct VehicleStat {
    pub name: String,
    pub income: f64,
    pub expense: f64,
    pub profit: f64,
    /// Porcentaje profit/income; 0 cuando no hubo ingresos
    pub margin: f64,
    pub status: VehicleStatus,
    pub rating: ProfitRating,
}

/// Agregados de toda la flota para el período
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioTotals {
    pub profit: f64,
    pub income: f64,
    pub expense: f64,
    /// Cantidad de vehículos con profit > 0
    pub profitable_count: usize,
}

/// Reporte completo de rentabilidad, ordenado por profit descendente
#[derive(Debug, Clone, Serialize)]
pub struct ProfitabilityReport {
    pub period: Period,
    pub per_vehicle: Vec<VehicleStat>,
    pub totals: PortfolioTotals,
}

/// Categoría de una notificación de vencimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Service,
    Registration,
    Insurance,
}

impl NotificationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Service => "service",
            NotificationCategory::Registration => "registration",
            NotificationCategory::Insurance => "insurance",
        }
    }

    /// Etiqueta visible en los mensajes al usuario
    pub fn label(&self) -> &'static str {
        match self {
            NotificationCategory::Service => "el servicio",
            NotificationCategory::Registration => "la matriculación",
            NotificationCategory::Insurance => "el seguro",
        }
    }
}

/// Urgencia de una notificación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    Warning,
    Info,
}

impl Urgency {
    /// Los vencimientos pasados siempre son críticos, sin importar
    /// cuánto tiempo llevan vencidos.
    pub fn from_days_left(days_left: i64) -> Self {
        if days_left <= 7 {
            Urgency::Critical
        } else if days_left <= 14 {
            Urgency::Warning
        } else {
            Urgency::Info
        }
    }
}

/// Notificación de vencimiento derivada - nunca se persiste.
/// Identidad: `(category, vehicle_id)` - como máximo una notificación
/// abierta por categoría y vehículo.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: String,
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub category: NotificationCategory,
    pub date: NaiveDate,
    pub days_left: i64,
    pub urgency: Urgency,
    pub message: String,
}
