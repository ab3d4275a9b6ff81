//! Authentication service
//!
//! Handles user registration, login, token refresh and access token checks.

use social_common::{hash_password, verify_password, AppError, TokenPair};
use social_core::entities::User;
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let username = request.username.trim();
        if username.chars().count() < 2 {
            return Err(ServiceError::validation("Username must be 2-32 characters"));
        }

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash = hash_password(&request.password)?;

        let user = User::new(self.ctx.generate_id(), username.to_string(), request.email);

        // A concurrent registration can still win the unique index
        match self.ctx.user_repo().create(&user, &password_hash).await {
            Err(DomainError::EmailAlreadyExists) => {
                return Err(ServiceError::conflict("Email already registered"));
            }
            result => result?,
        }

        info!(user_id = %user.id, "User registered successfully");

        let tokens = self.ctx.jwt_service().issue(user.id)?;
        Ok(AuthResponse::new(tokens, &user))
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if let Err(e) = verify_password(&request.password, &password_hash) {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User logged in successfully");

        let tokens = self.ctx.jwt_service().issue(user.id)?;
        Ok(AuthResponse::new(tokens, &user))
    }

    /// Exchange a refresh token for a new token pair
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<TokenPair> {
        let claims = self.ctx.jwt_service().verify_refresh(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        // Tokens of deleted accounts stop working
        if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
            warn!(user_id = %user_id, "Refresh rejected: unknown user");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        let tokens = self.ctx.jwt_service().issue(user_id)?;

        info!(user_id = %user_id, "Tokens refreshed successfully");
        Ok(tokens)
    }

    /// Validate an access token and return the user ID
    pub fn validate_token(&self, token: &str) -> ServiceResult<Snowflake> {
        let claims = self.ctx.jwt_service().verify_access(token)?;
        Ok(claims.user_id()?)
    }
}
