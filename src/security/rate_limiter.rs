//! Rate limiter de intentos de login
//!
//! Contador de intentos por identificador (username) con ventana
//! deslizante, para frenar el adivinado de credenciales. Vive solo en
//! memoria: un reinicio del proceso borra todos los límites.
//!
//! El reloj se pasa como parámetro en cada operación. Eso mantiene el
//! componente determinista y deja que los tests controlen el tiempo.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

/// Intentos permitidos por defecto dentro de una ventana
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
/// Duración por defecto de la ventana, en minutos
pub const DEFAULT_WINDOW_MINUTES: i64 = 15;

/// Registro de intentos de un identificador
#[derive(Debug, Clone)]
struct AttemptRecord {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Rate limiter por identificador.
///
/// Se construye explícitamente (no hay singleton de módulo) para que la
/// aplicación y los tests puedan tener instancias independientes. El
/// mapa de identificadores no tiene tope ni eviction: las entradas solo
/// se reemplazan cuando expira su ventana o se las resetea.
#[derive(Debug)]
pub struct LoginRateLimiter {
    attempts: HashMap<String, AttemptRecord>,
    max_attempts: u32,
    window: Duration,
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, Duration::minutes(DEFAULT_WINDOW_MINUTES))
    }
}

impl LoginRateLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            attempts: HashMap::new(),
            max_attempts,
            window,
        }
    }

    /// Consume un slot de intento para `identifier` y devuelve si el
    /// intento está permitido.
    ///
    /// La verificación misma gasta un slot: el caller la invoca ANTES de
    /// autenticar y llama a [`reset`](Self::reset) si el login fue
    /// exitoso. Cuando la ventana anterior ya expiró (`now > reset_at`)
    /// el contador arranca de nuevo aunque la ventana vieja hubiera
    /// quedado agotada.
    pub fn check_limit(&mut self, identifier: &str, now: DateTime<Utc>) -> bool {
        if let Some(record) = self.attempts.get_mut(identifier) {
            if now <= record.reset_at {
                if record.count >= self.max_attempts {
                    return false;
                }
                record.count += 1;
                return true;
            }
        }

        // Sin registro o ventana expirada: arranca una ventana nueva
        self.attempts.insert(
            identifier.to_string(),
            AttemptRecord {
                count: 1,
                reset_at: now + self.window,
            },
        );
        true
    }

    /// Minutos que faltan para que expire la ventana de `identifier`,
    /// redondeados hacia arriba. 0 si no hay registro o ya expiró.
    pub fn remaining_minutes(&self, identifier: &str, now: DateTime<Utc>) -> i64 {
        let Some(record) = self.attempts.get(identifier) else {
            return 0;
        };

        let remaining_ms = (record.reset_at - now).num_milliseconds();
        if remaining_ms > 0 {
            (remaining_ms + 59_999) / 60_000
        } else {
            0
        }
    }

    /// Borra el registro de `identifier`, devolviéndole el presupuesto
    /// completo de intentos de inmediato.
    pub fn reset(&mut self, identifier: &str) {
        self.attempts.remove(identifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_allows_up_to_max_attempts() {
        let mut limiter = LoginRateLimiter::default();
        let now = at(0);

        for _ in 0..5 {
            assert!(limiter.check_limit("driver1", now));
        }
        assert!(!limiter.check_limit("driver1", now));
    }

    #[test]
    fn test_blocked_check_does_not_extend_window() {
        let mut limiter = LoginRateLimiter::default();

        for _ in 0..5 {
            assert!(limiter.check_limit("driver1", at(0)));
        }
        assert!(!limiter.check_limit("driver1", at(60)));
        // La ventana sigue anclada al primer intento
        assert_eq!(limiter.remaining_minutes("driver1", at(60)), 14);
    }

    #[test]
    fn test_new_window_after_expiry_even_if_exhausted() {
        let mut limiter = LoginRateLimiter::default();

        for _ in 0..6 {
            limiter.check_limit("driver1", at(0));
        }
        // Pasados los 15 minutos el contador arranca de nuevo
        assert!(limiter.check_limit("driver1", at(15 * 60 + 1)));
        assert_eq!(limiter.remaining_minutes("driver1", at(15 * 60 + 1)), 15);
    }

    #[test]
    fn test_reset_restores_full_budget() {
        let mut limiter = LoginRateLimiter::default();

        for _ in 0..6 {
            limiter.check_limit("driver1", at(0));
        }
        limiter.reset("driver1");

        for _ in 0..5 {
            assert!(limiter.check_limit("driver1", at(1)));
        }
        assert!(!limiter.check_limit("driver1", at(1)));
    }

    #[test]
    fn test_identifiers_are_independent() {
        let mut limiter = LoginRateLimiter::default();

        for _ in 0..6 {
            limiter.check_limit("driver1", at(0));
        }
        assert!(limiter.check_limit("driver2", at(0)));
    }

    #[test]
    fn test_remaining_minutes_rounds_up() {
        let mut limiter = LoginRateLimiter::default();
        limiter.check_limit("driver1", at(0));

        // 14 minutos y 1 segundo restantes -> 15
        assert_eq!(limiter.remaining_minutes("driver1", at(59)), 15);
        // Exactamente 10 minutos -> 10
        assert_eq!(limiter.remaining_minutes("driver1", at(5 * 60)), 10);
        // Ventana expirada -> 0
        assert_eq!(limiter.remaining_minutes("driver1", at(16 * 60)), 0);
        // Identificador desconocido -> 0
        assert_eq!(limiter.remaining_minutes("ghost", at(0)), 0);
    }

    #[test]
    fn test_custom_limits() {
        let mut limiter = LoginRateLimiter::new(2, Duration::minutes(1));
        let now = at(0);

        assert!(limiter.check_limit("x", now));
        assert!(limiter.check_limit("x", now));
        assert!(!limiter.check_limit("x", now));
        assert!(limiter.check_limit("x", at(61)));
    }
}
