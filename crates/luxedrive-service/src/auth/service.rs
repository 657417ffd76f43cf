//! Account registration and credential exchange.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use luxedrive_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator, TokenPair};
use luxedrive_core::error::AppError;
use luxedrive_core::result::AppResult;
use luxedrive_database::stores::UserStore;
use luxedrive_entity::user::{NewUser, User};

const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";

/// Data for public customer registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Issues and refreshes tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
            decoder,
        }
    }

    /// Register a customer account. Public registration never grants
    /// staff or superuser rights.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<User> {
        let email = req.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }

        self.validator
            .validate(&req.password, &[&email, &req.first_name, &req.last_name])?;

        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .users
            .create(&NewUser {
                email,
                password_hash,
                first_name: req.first_name.trim().to_string(),
                last_name: req.last_name.trim().to_string(),
                is_staff: false,
                is_superuser: false,
            })
            .await?;

        info!(user_id = %user.id, "Customer registered");
        Ok(user)
    }

    /// Exchange email and password for a token pair.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::authentication(INVALID_CREDENTIALS))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id, "User logged in");
        self.encoder.generate_token_pair(&user)
    }

    /// Exchange a refresh token for a new pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::authentication("User not found or inactive"))?;

        self.encoder.generate_token_pair(&user)
    }
}
