use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, UserResponse,
};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::security::password::{hash_password, verify_password};
use crate::security::LoginRateLimiter;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::validation::{validate_email, validate_password_strength, validate_username};

const INVALID_CREDENTIALS: &str = "Usuario o contraseña incorrectos";

pub struct AuthController {
    repository: UserRepository,
    config: EnvironmentConfig,
    login_limiter: Arc<RwLock<LoginRateLimiter>>,
}

impl AuthController {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        login_limiter: Arc<RwLock<LoginRateLimiter>>,
    ) -> Self {
        Self {
            repository: UserRepository::new(pool),
            config,
            login_limiter,
        }
    }

    /// Login con rate limiting por username.
    ///
    /// El limiter se consulta ANTES de verificar credenciales: cada
    /// verificación gasta un slot de intento, y un login exitoso
    /// resetea el contador.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let now = Utc::now();
        {
            let mut limiter = self.login_limiter.write().await;
            if !limiter.check_limit(&request.username, now) {
                let minutes = limiter.remaining_minutes(&request.username, now);
                log::warn!("Login bloqueado por rate limit: {}", request.username);
                return Err(AppError::TooManyAttempts(minutes));
            }
        }

        // Mismo mensaje para usuario inexistente y contraseña incorrecta
        let user = self
            .repository
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        self.login_limiter.write().await.reset(&request.username);

        let jwt_config = JwtConfig::from(&self.config);
        let token = generate_token(&user, &jwt_config)?;
        let expires_at = now + chrono::Duration::seconds(jwt_config.expiration as i64);

        log::info!("Login exitoso: {}", user.username);

        Ok(LoginResponse {
            token,
            user: UserResponse::from(user),
            expires_at,
        })
    }

    /// Registrar un usuario nuevo. El gate de admin es una verificación
    /// de cortesía sobre el rol del caller, no un control de seguridad.
    pub async fn register(
        &self,
        caller: &AuthenticatedUser,
        request: RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        if caller.role != UserRole::Admin {
            return Err(AppError::Forbidden(
                "Solo un administrador puede crear usuarios".to_string(),
            ));
        }

        request.validate()?;
        validate_username(&request.username)
            .map_err(|_| AppError::BadRequest("Username inválido: 3-20 caracteres alfanuméricos o _".to_string()))?;
        validate_email(&request.email)
            .map_err(|_| AppError::BadRequest("Email inválido".to_string()))?;
        validate_password_strength(&request.password)
            .map_err(|errors| AppError::BadRequest(errors.join("; ")))?;

        if self.repository.username_exists(&request.username).await? {
            return Err(AppError::Conflict(
                "El nombre de usuario ya está registrado".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .repository
            .create(
                request.username,
                request.email,
                password_hash,
                request.role.unwrap_or(UserRole::User),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            UserResponse::from(user),
            "Usuario creado exitosamente".to_string(),
        ))
    }

    /// Cambiar la contraseña del usuario autenticado
    pub async fn change_password(
        &self,
        caller: &AuthenticatedUser,
        request: ChangePasswordRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;
        validate_password_strength(&request.new_password)
            .map_err(|errors| AppError::BadRequest(errors.join("; ")))?;

        let user = self
            .repository
            .find_by_id(caller.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        if !verify_password(&request.old_password, &user.password_hash)? {
            return Err(AppError::Unauthorized(
                "La contraseña actual no es correcta".to_string(),
            ));
        }

        let password_hash = hash_password(&request.new_password)?;
        self.repository.update_password(user.id, password_hash).await?;

        Ok(ApiResponse::success_with_message(
            (),
            "Contraseña actualizada exitosamente".to_string(),
        ))
    }

    /// Listar todos los usuarios (solo admin)
    pub async fn list_users(
        &self,
        caller: &AuthenticatedUser,
    ) -> Result<Vec<UserResponse>, AppError> {
        if caller.role != UserRole::Admin {
            return Err(AppError::Forbidden(
                "Solo un administrador puede listar usuarios".to_string(),
            ));
        }

        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Eliminar un usuario (solo admin)
    pub async fn delete_user(
        &self,
        caller: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<(), AppError> {
        if caller.role != UserRole::Admin {
            return Err(AppError::Forbidden(
                "Solo un administrador puede eliminar usuarios".to_string(),
            ));
        }

        if caller.id == id {
            return Err(AppError::BadRequest(
                "No puede eliminar su propio usuario".to_string(),
            ));
        }

        self.repository.delete(id).await
    }

    /// Crear el usuario admin inicial si la tabla está vacía
    pub async fn seed_default_admin(&self) -> Result<(), AppError> {
        if self.repository.count().await? > 0 {
            return Ok(());
        }

        let password_hash = hash_password(&self.config.admin_password)?;
        let user = self
            .repository
            .create(
                self.config.admin_username.clone(),
                self.config.admin_email.clone(),
                password_hash,
                UserRole::Admin,
            )
            .await?;

        log::info!("Usuario admin inicial creado: {}", user.username);
        Ok(())
    }
}
