//! Middleware de autenticación
//!
//! Valida el JWT del header Authorization y deja el usuario
//! autenticado en las extensions del request para los handlers.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::models::user::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtClaims, JwtConfig};

/// Usuario autenticado, extraído de los claims del token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl TryFrom<&JwtClaims> for AuthenticatedUser {
    type Error = AppError;

    fn try_from(claims: &JwtClaims) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Jwt("Subject del token inválido".to_string()))?;

        Ok(Self {
            id,
            username: claims.username.clone(),
            role: claims.role,
        })
    }
}

/// Middleware de autenticación
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Falta el header Authorization".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &JwtConfig::from(&state.config))?;
    let user = AuthenticatedUser::try_from(&claims)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
