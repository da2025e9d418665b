//! Servicio de Analytics
//!
//! Funciones puras sobre los datos actuales de la flota:
//!
//! - Rentabilidad por vehículo dentro de un período, repartiendo las
//!   transacciones agrupadas ("All") en partes iguales entre los
//!   vehículos activos.
//! - Notificaciones de vencimientos (servicio, matriculación, seguro)
//!   clasificadas por urgencia.
//!
//! Ninguna función hace I/O ni lee el reloj: los repositorios entregan
//! las colecciones y el caller pasa `now` explícitamente.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Months, NaiveTime, Utc};
use rust_decimal::prelude::ToPrimitive;

use crate::models::analytics::{
    Notification, NotificationCategory, Period, PortfolioTotals, ProfitRating,
    ProfitabilityReport, Urgency, VehicleStat,
};
use crate::models::transaction::{Transaction, TransactionKind, VehicleRef};
use crate::models::vehicle::{Vehicle, VehicleStatus};

const SECONDS_PER_DAY: i64 = 86_400;
/// Horizonte de aviso para vencimientos futuros, en días
const NOTIFICATION_HORIZON_DAYS: i64 = 30;

/// Inicio de la ventana de un período, anclado a `now`.
///
/// Mes y año restan meses de calendario (el 31 de marzo menos un mes es
/// el 28/29 de febrero), no una cantidad fija de días.
pub fn period_start(period: Period, now: DateTime<Utc>) -> DateTime<Utc> {
    match period {
        Period::Week => now - Duration::days(7),
        Period::Month => now
            .checked_sub_months(Months::new(1))
            .unwrap_or_else(|| now - Duration::days(30)),
        Period::Year => now
            .checked_sub_months(Months::new(12))
            .unwrap_or_else(|| now - Duration::days(365)),
    }
}

/// Calcula el reporte de rentabilidad por vehículo para el período.
///
/// Las transacciones con fecha en `[inicio, hoy]` (ambos inclusive)
/// se acumulan por vehículo. Las transacciones "All" se dividen en
/// partes iguales entre los vehículos activos; si no hay ninguno
/// activo la transacción no aporta nada (no hay división por cero).
/// Referencias a vehículos ya borrados tampoco aportan.
pub fn compute_vehicle_profitability(
    period: Period,
    vehicles: &[Vehicle],
    transactions: &[Transaction],
    now: DateTime<Utc>,
) -> ProfitabilityReport {
    let start = period_start(period, now).date_naive();
    let today = now.date_naive();

    // Un acumulador por vehículo, en el orden de entrada. Los nombres
    // son únicos dentro de la flota.
    let mut stats: Vec<VehicleStat> = vehicles
        .iter()
        .map(|v| VehicleStat {
            name: v.name.clone(),
            income: 0.0,
            expense: 0.0,
            profit: 0.0,
            margin: 0.0,
            status: v.status,
            rating: ProfitRating::Excellent,
        })
        .collect();

    let index: HashMap<&str, usize> = vehicles
        .iter()
        .enumerate()
        .map(|(i, v)| (v.name.as_str(), i))
        .collect();

    let active: Vec<usize> = vehicles
        .iter()
        .enumerate()
        .filter(|(_, v)| v.status == VehicleStatus::Active)
        .map(|(i, _)| i)
        .collect();

    for transaction in transactions {
        if transaction.date < start || transaction.date > today {
            continue;
        }

        let amount = transaction.amount.to_f64().unwrap_or(0.0);
        match &transaction.vehicle {
            VehicleRef::AllActive => {
                if active.is_empty() {
                    continue;
                }
                let share = amount / active.len() as f64;
                for &i in &active {
                    accumulate(&mut stats[i], transaction.kind, share);
                }
            }
            VehicleRef::Specific(name) => {
                if let Some(&i) = index.get(name.as_str()) {
                    accumulate(&mut stats[i], transaction.kind, amount);
                }
            }
        }
    }

    for stat in &mut stats {
        stat.profit = stat.income - stat.expense;
        stat.margin = if stat.income > 0.0 {
            stat.profit / stat.income * 100.0
        } else {
            0.0
        };
        stat.rating = ProfitRating::classify(stat.profit, stat.margin);
    }

    // Orden descendente por profit; sort_by es estable, los empates
    // conservan el orden de entrada.
    stats.sort_by(|a, b| b.profit.total_cmp(&a.profit));

    let totals = PortfolioTotals {
        profit: stats.iter().map(|s| s.profit).sum(),
        income: stats.iter().map(|s| s.income).sum(),
        expense: stats.iter().map(|s| s.expense).sum(),
        profitable_count: stats.iter().filter(|s| s.profit > 0.0).count(),
    };

    ProfitabilityReport {
        period,
        per_vehicle: stats,
        totals,
    }
}

fn accumulate(stat: &mut VehicleStat, kind: TransactionKind, amount: f64) {
    match kind {
        TransactionKind::Income => stat.income += amount,
        TransactionKind::Expense => stat.expense += amount,
    }
}

/// Días hasta la medianoche de `target`, redondeando hacia arriba.
/// Negativo cuando la fecha ya pasó.
fn days_until(target: chrono::NaiveDate, now: DateTime<Utc>) -> i64 {
    let target_midnight = target.and_time(NaiveTime::MIN).and_utc();
    let seconds = (target_midnight - now).num_seconds();
    (seconds + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY)
}

/// Deriva las notificaciones de vencimientos de toda la flota.
///
/// Por vehículo se revisan sus tres fechas opcionales. Se emite una
/// notificación cuando la fecha ya venció o vence dentro de los
/// próximos 30 días; las fechas más lejanas se ignoran. El resultado
/// viene ordenado: bloque crítico primero y dentro de cada bloque por
/// `days_left` ascendente (orden estable).
pub fn compute_notifications(vehicles: &[Vehicle], now: DateTime<Utc>) -> Vec<Notification> {
    let mut notifications = Vec::new();

    for vehicle in vehicles {
        let deadlines = [
            (NotificationCategory::Service, vehicle.next_service_date),
            (NotificationCategory::Registration, vehicle.next_registration_date),
            (NotificationCategory::Insurance, vehicle.insurance_expiry_date),
        ];

        for (category, date) in deadlines {
            let Some(date) = date else { continue };
            let days_left = days_until(date, now);
            if days_left > NOTIFICATION_HORIZON_DAYS {
                continue;
            }

            notifications.push(Notification {
                id: format!("{}-{}", category.as_str(), vehicle.id),
                vehicle_id: vehicle.id,
                vehicle_name: vehicle.name.clone(),
                category,
                date,
                days_left,
                urgency: Urgency::from_days_left(days_left),
                message: notification_message(&vehicle.name, category, days_left),
            });
        }
    }

    notifications.sort_by_key(|n| (n.urgency != Urgency::Critical, n.days_left));
    notifications
}

/// Texto visible de la notificación. Las cuatro formas (vencido, hoy,
/// mañana, en N días) son parte del contrato con el frontend.
fn notification_message(
    vehicle_name: &str,
    category: NotificationCategory,
    days_left: i64,
) -> String {
    let label = category.label();
    if days_left < 0 {
        format!("{} - {} venció hace {} días!", vehicle_name, label, days_left.abs())
    } else if days_left == 0 {
        format!("{} - {} vence hoy!", vehicle_name, label)
    } else if days_left == 1 {
        format!("{} - {} vence mañana", vehicle_name, label)
    } else {
        format!("{} - {} vence en {} días", vehicle_name, label, days_left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn vehicle(name: &str, status: VehicleStatus) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            name: name.to_string(),
            license_plate: format!("BG-{}", name),
            vehicle_type: None,
            capacity_tons: None,
            year: None,
            mileage_km: None,
            status,
            next_registration_date: None,
            next_service_date: None,
            insurance_expiry_date: None,
            insurance_policy_number: None,
            created_at: Utc::now(),
        }
    }

    fn transaction(
        date: NaiveDate,
        kind: TransactionKind,
        amount: i64,
        vehicle: VehicleRef,
    ) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            date,
            kind,
            category: "transporte".to_string(),
            amount: Decimal::from(amount),
            description: None,
            vehicle,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_period_start_calendar_aware() {
        let now = noon(2026, 3, 31);
        assert_eq!(period_start(Period::Week, now).date_naive(), date(2026, 3, 24));
        // Un mes de calendario hacia atrás, recortado al fin de febrero
        assert_eq!(period_start(Period::Month, now).date_naive(), date(2026, 2, 28));
        assert_eq!(period_start(Period::Year, now).date_naive(), date(2025, 3, 31));
    }

    #[test]
    fn test_pooled_transaction_split_between_active_vehicles() {
        let now = noon(2026, 8, 6);
        let vehicles = vec![
            vehicle("V1", VehicleStatus::Active),
            vehicle("V2", VehicleStatus::Active),
        ];
        let transactions = vec![transaction(
            now.date_naive(),
            TransactionKind::Income,
            1000,
            VehicleRef::AllActive,
        )];

        let report = compute_vehicle_profitability(Period::Month, &vehicles, &transactions, now);

        assert_eq!(report.per_vehicle.len(), 2);
        for stat in &report.per_vehicle {
            assert_eq!(stat.income, 500.0);
            assert_eq!(stat.expense, 0.0);
        }
    }

    #[test]
    fn test_pooled_transaction_skips_inactive_vehicles() {
        let now = noon(2026, 8, 6);
        let vehicles = vec![
            vehicle("V1", VehicleStatus::Active),
            vehicle("V2", VehicleStatus::Inactive),
        ];
        let transactions = vec![transaction(
            now.date_naive(),
            TransactionKind::Income,
            1000,
            VehicleRef::AllActive,
        )];

        let report = compute_vehicle_profitability(Period::Month, &vehicles, &transactions, now);

        let v1 = report.per_vehicle.iter().find(|s| s.name == "V1").unwrap();
        let v2 = report.per_vehicle.iter().find(|s| s.name == "V2").unwrap();
        assert_eq!(v1.income, 1000.0);
        assert_eq!(v2.income, 0.0);
    }

    #[test]
    fn test_pooled_transaction_with_no_active_vehicles_is_dropped() {
        let now = noon(2026, 8, 6);
        let vehicles = vec![
            vehicle("V1", VehicleStatus::Inactive),
            vehicle("V2", VehicleStatus::InService),
        ];
        let transactions = vec![transaction(
            now.date_naive(),
            TransactionKind::Expense,
            900,
            VehicleRef::AllActive,
        )];

        let report = compute_vehicle_profitability(Period::Week, &vehicles, &transactions, now);

        assert!(report.per_vehicle.iter().all(|s| s.expense == 0.0));
        assert_eq!(report.totals.expense, 0.0);
    }

    #[test]
    fn test_allocation_conserves_total_amount() {
        let now = noon(2026, 8, 6);
        let vehicles = vec![
            vehicle("V1", VehicleStatus::Active),
            vehicle("V2", VehicleStatus::Active),
            vehicle("V3", VehicleStatus::Active),
            vehicle("V4", VehicleStatus::Inactive),
        ];
        let transactions = vec![
            transaction(now.date_naive(), TransactionKind::Income, 1000, VehicleRef::AllActive),
            transaction(now.date_naive(), TransactionKind::Expense, 250, VehicleRef::AllActive),
        ];

        let report = compute_vehicle_profitability(Period::Month, &vehicles, &transactions, now);

        assert!((report.totals.income - 1000.0).abs() < 1e-9);
        assert!((report.totals.expense - 250.0).abs() < 1e-9);
        let v4 = report.per_vehicle.iter().find(|s| s.name == "V4").unwrap();
        assert_eq!(v4.income, 0.0);
        assert_eq!(v4.expense, 0.0);
    }

    #[test]
    fn test_unknown_vehicle_reference_contributes_nothing() {
        let now = noon(2026, 8, 6);
        let vehicles = vec![vehicle("V1", VehicleStatus::Active)];
        let transactions = vec![transaction(
            now.date_naive(),
            TransactionKind::Income,
            700,
            VehicleRef::Specific("borrado".to_string()),
        )];

        let report = compute_vehicle_profitability(Period::Month, &vehicles, &transactions, now);

        assert_eq!(report.per_vehicle[0].income, 0.0);
        assert_eq!(report.totals.income, 0.0);
    }

    #[test]
    fn test_date_window_is_inclusive_on_both_ends() {
        let now = noon(2026, 8, 6);
        let start = period_start(Period::Week, now).date_naive();
        let vehicles = vec![vehicle("V1", VehicleStatus::Active)];
        let transactions = vec![
            transaction(start, TransactionKind::Income, 100, VehicleRef::Specific("V1".into())),
            transaction(now.date_naive(), TransactionKind::Income, 10, VehicleRef::Specific("V1".into())),
            // Un día antes del inicio: fuera de la ventana
            transaction(start - Duration::days(1), TransactionKind::Income, 1000, VehicleRef::Specific("V1".into())),
            // Fecha futura: fuera de la ventana
            transaction(now.date_naive() + Duration::days(1), TransactionKind::Income, 1000, VehicleRef::Specific("V1".into())),
        ];

        let report = compute_vehicle_profitability(Period::Week, &vehicles, &transactions, now);

        assert_eq!(report.per_vehicle[0].income, 110.0);
    }

    #[test]
    fn test_profit_identity_and_sort_order() {
        let now = noon(2026, 8, 6);
        let vehicles = vec![
            vehicle("V1", VehicleStatus::Active),
            vehicle("V2", VehicleStatus::Active),
            vehicle("V3", VehicleStatus::Active),
        ];
        let today = now.date_naive();
        let transactions = vec![
            transaction(today, TransactionKind::Income, 1000, VehicleRef::Specific("V1".into())),
            transaction(today, TransactionKind::Expense, 300, VehicleRef::Specific("V1".into())),
            transaction(today, TransactionKind::Income, 5000, VehicleRef::Specific("V2".into())),
            transaction(today, TransactionKind::Expense, 100, VehicleRef::Specific("V2".into())),
            transaction(today, TransactionKind::Expense, 400, VehicleRef::Specific("V3".into())),
        ];

        let report = compute_vehicle_profitability(Period::Month, &vehicles, &transactions, now);

        let names: Vec<&str> = report.per_vehicle.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["V2", "V1", "V3"]);

        for stat in &report.per_vehicle {
            assert_eq!(stat.profit, stat.income - stat.expense);
        }
        assert_eq!(report.totals.profitable_count, 2);
        assert_eq!(report.totals.profit, 5200.0);
    }

    #[test]
    fn test_margin_is_zero_without_income() {
        let now = noon(2026, 8, 6);
        let vehicles = vec![vehicle("V1", VehicleStatus::Active)];
        let transactions = vec![transaction(
            now.date_naive(),
            TransactionKind::Expense,
            500,
            VehicleRef::Specific("V1".into()),
        )];

        let report = compute_vehicle_profitability(Period::Month, &vehicles, &transactions, now);

        let stat = &report.per_vehicle[0];
        assert_eq!(stat.margin, 0.0);
        assert_eq!(stat.profit, -500.0);
        assert_eq!(stat.rating, ProfitRating::Loss);
    }

    #[test]
    fn test_idle_vehicle_has_zero_profit_and_margin() {
        let now = noon(2026, 8, 6);
        let vehicles = vec![vehicle("V1", VehicleStatus::Active)];

        let report = compute_vehicle_profitability(Period::Year, &vehicles, &[], now);

        let stat = &report.per_vehicle[0];
        assert_eq!(stat.profit, 0.0);
        assert_eq!(stat.margin, 0.0);
    }

    #[test]
    fn test_rating_classification() {
        assert_eq!(ProfitRating::classify(-1.0, 0.0), ProfitRating::Loss);
        assert_eq!(ProfitRating::classify(100.0, 10.0), ProfitRating::Weak);
        assert_eq!(ProfitRating::classify(100.0, 60.0), ProfitRating::Excellent);
        assert_eq!(ProfitRating::classify(100.0, 35.0), ProfitRating::Good);
        assert_eq!(ProfitRating::classify(100.0, 20.0), ProfitRating::Good);
        assert_eq!(ProfitRating::classify(100.0, 50.0), ProfitRating::Good);
        // Sin movimiento cae en el default
        assert_eq!(ProfitRating::classify(0.0, 0.0), ProfitRating::Excellent);
    }

    #[test]
    fn test_notification_horizon_boundaries() {
        let now = noon(2026, 8, 6);

        let mut v = vehicle("V1", VehicleStatus::Active);
        v.next_service_date = Some(now.date_naive() + Duration::days(30));
        let notifications = compute_notifications(&[v.clone()], now);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].days_left, 30);
        assert_eq!(notifications[0].urgency, Urgency::Info);

        v.next_service_date = Some(now.date_naive() + Duration::days(31));
        assert!(compute_notifications(&[v.clone()], now).is_empty());

        v.next_service_date = Some(now.date_naive() + Duration::days(7));
        let notifications = compute_notifications(&[v.clone()], now);
        assert_eq!(notifications[0].urgency, Urgency::Critical);

        v.next_service_date = Some(now.date_naive() - Duration::days(1));
        let notifications = compute_notifications(&[v], now);
        assert_eq!(notifications[0].days_left, -1);
        assert_eq!(notifications[0].urgency, Urgency::Critical);
        assert_eq!(notifications[0].message, "V1 - el servicio venció hace 1 días!");
    }

    #[test]
    fn test_registration_in_five_days_is_critical() {
        let now = noon(2026, 8, 6);
        let mut v = vehicle("Kamion 1", VehicleStatus::Active);
        v.next_registration_date = Some(now.date_naive() + Duration::days(5));

        let notifications = compute_notifications(&[v], now);

        assert_eq!(notifications.len(), 1);
        let n = &notifications[0];
        assert_eq!(n.category, NotificationCategory::Registration);
        assert_eq!(n.days_left, 5);
        assert_eq!(n.urgency, Urgency::Critical);
        assert_eq!(n.message, "Kamion 1 - la matriculación vence en 5 días");
    }

    #[test]
    fn test_notification_messages_for_today_and_tomorrow() {
        let now = noon(2026, 8, 6);
        let mut v = vehicle("V1", VehicleStatus::Active);

        v.insurance_expiry_date = Some(now.date_naive());
        let notifications = compute_notifications(&[v.clone()], now);
        assert_eq!(notifications[0].days_left, 0);
        assert_eq!(notifications[0].message, "V1 - el seguro vence hoy!");

        v.insurance_expiry_date = Some(now.date_naive() + Duration::days(1));
        let notifications = compute_notifications(&[v], now);
        assert_eq!(notifications[0].days_left, 1);
        assert_eq!(notifications[0].message, "V1 - el seguro vence mañana");
    }

    #[test]
    fn test_notifications_sorted_critical_first_then_days_left() {
        let now = noon(2026, 8, 6);
        let today = now.date_naive();

        let mut v1 = vehicle("V1", VehicleStatus::Active);
        v1.next_service_date = Some(today + Duration::days(20)); // info
        v1.next_registration_date = Some(today + Duration::days(3)); // critical

        let mut v2 = vehicle("V2", VehicleStatus::Active);
        v2.insurance_expiry_date = Some(today - Duration::days(2)); // critical, vencido
        v2.next_service_date = Some(today + Duration::days(10)); // warning

        let notifications = compute_notifications(&[v1, v2], now);

        let summary: Vec<(&str, i64)> = notifications
            .iter()
            .map(|n| (n.category.as_str(), n.days_left))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("insurance", -2),
                ("registration", 3),
                ("service", 10),
                ("service", 20),
            ]
        );
    }

    #[test]
    fn test_one_notification_per_category_and_vehicle() {
        let now = noon(2026, 8, 6);
        let today = now.date_naive();
        let mut v = vehicle("V1", VehicleStatus::Active);
        v.next_service_date = Some(today + Duration::days(2));
        v.next_registration_date = Some(today + Duration::days(9));
        v.insurance_expiry_date = Some(today + Duration::days(25));

        let notifications = compute_notifications(&[v], now);

        assert_eq!(notifications.len(), 3);
        let mut ids: Vec<&str> = notifications.iter().map(|n| n.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_vehicles_without_dates_produce_nothing() {
        let now = noon(2026, 8, 6);
        let vehicles = vec![
            vehicle("V1", VehicleStatus::Active),
            vehicle("V2", VehicleStatus::Inactive),
        ];

        assert!(compute_notifications(&vehicles, now).is_empty());
    }
}
