//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! que no cubren los derives de `validator`.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_]{3,20}$").unwrap();
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref SPECIAL_CHAR_REGEX: Regex =
        Regex::new(r#"[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]"#).unwrap();
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar username (alfanumérico y guión bajo, 3-20 caracteres)
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    if !USERNAME_REGEX.is_match(value) {
        let mut error = ValidationError::new("username");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"3-20 caracteres alfanuméricos o _".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_REGEX.is_match(value) {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar la fortaleza de una contraseña.
///
/// Devuelve la lista completa de requisitos incumplidos, no solo el
/// primero, para que el frontend pueda mostrarlos todos juntos.
pub fn validate_password_strength(password: &str) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("La contraseña debe tener al menos 8 caracteres".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("La contraseña debe contener al menos una mayúscula".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("La contraseña debe contener al menos una minúscula".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("La contraseña debe contener al menos un número".to_string());
    }
    if !SPECIAL_CHAR_REGEX.is_match(password) {
        errors.push("La contraseña debe contener al menos un carácter especial (!@#$%^&* etc.)".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let clean_plate = value.replace([' ', '-', '_'], "");
    if clean_plate.len() < 4 || clean_plate.len() > 10 {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2026-01-15").is_ok());
        assert!(validate_date("2026/01/15").is_err());
        assert!(validate_date("15-01-2026").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("kamion").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("marko_92").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("con espacios").is_err());
        assert!(validate_username(&"a".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("test@").is_err());
    }

    #[test]
    fn test_validate_password_strength() {
        assert!(validate_password_strength("Str0ng!pass").is_ok());

        let errors = validate_password_strength("debil").unwrap_err();
        // Corta, sin mayúscula, sin número, sin especial
        assert_eq!(errors.len(), 4);

        assert!(validate_password_strength("SINMINUSCULA1!").is_err());
        assert!(validate_password_strength("SinNumero!!").is_err());
        assert!(validate_password_strength("SinEspecial11").is_err());
    }

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("BG-123-AB").is_ok());
        assert!(validate_license_plate("A1").is_err());
        assert!(validate_license_plate("ABCDEFGHIJK").is_err());
    }
}
