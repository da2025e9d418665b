//! Hashing de contraseñas
//!
//! Wrappers finos sobre bcrypt que traducen los errores al tipo de la
//! aplicación.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::utils::errors::AppError;

/// Hashear una contraseña con bcrypt
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))
}

/// Verificar una contraseña contra su hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(password, password_hash).map_err(|e| AppError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hashed = hash_password("Str0ng!pass").unwrap();
        assert_ne!(hashed, "Str0ng!pass");
        assert!(verify_password("Str0ng!pass", &hashed).unwrap());
        assert!(!verify_password("otra", &hashed).unwrap());
    }
}
