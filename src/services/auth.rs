//! Auth service
//!
//! Implements signup, login, and token-based user resolution:
//! - Signup validates input, rejects duplicate email/name, hashes the
//!   password, and fires the best-effort welcome mail
//! - Login verifies credentials and issues a signed 72-hour token
//! - Current-user lookup decodes a bearer token back to its user row

use crate::db::repositories::UserRepository;
use crate::models::{LoginInput, SignupInput, User, UserRole};
use crate::services::email::EmailService;
use crate::services::password::{hash_password, verify_password};
use crate::services::token::{decode_token, encode_token};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w\.-]+@[\w\.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Error types for auth service operations
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Authentication failed (invalid credentials or token)
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// User already exists
    #[error("User already exists: {0}")]
    UserExists(String),

    /// User is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Auth service for signup, login, and token resolution
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    email_service: Arc<EmailService>,
    jwt_secret: String,
    token_expiry_hours: i64,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        email_service: Arc<EmailService>,
        jwt_secret: String,
        token_expiry_hours: i64,
    ) -> Self {
        Self {
            user_repo,
            email_service,
            jwt_secret,
            token_expiry_hours,
        }
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// - `ValidationError` if a field is empty or the email is malformed
    /// - `UserExists` if the email or name is already taken
    /// - `InternalError` for hashing or database errors
    pub async fn signup(&self, input: SignupInput) -> Result<User, AuthServiceError> {
        self.validate_signup_input(&input)?;

        if self
            .user_repo
            .get_by_email(&input.email)
            .await
            .context("Failed to check email")?
            .is_some()
        {
            return Err(AuthServiceError::UserExists(
                "Email already registered".to_string(),
            ));
        }

        if self
            .user_repo
            .get_by_name(&input.name)
            .await
            .context("Failed to check name")?
            .is_some()
        {
            return Err(AuthServiceError::UserExists(
                "Name already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&input.password).context("Failed to hash password")?;

        let user = User::new(
            input.name,
            input.email,
            password_hash,
            input.phone,
            UserRole::User,
        );

        let created = self
            .user_repo
            .create(&user)
            .await
            .context("Failed to create user")?;

        // Welcome mail is best-effort: a delivery failure is logged and
        // never surfaced to the caller
        let email_service = self.email_service.clone();
        let to_email = created.email.clone();
        tokio::spawn(async move {
            if let Err(e) = email_service.send_signup_mail(&to_email).await {
                tracing::warn!("Failed to send signup mail to {}: {}", to_email, e);
            } else {
                tracing::info!("Signup mail sent to {}", to_email);
            }
        });

        Ok(created)
    }

    /// Login with email and password
    ///
    /// # Errors
    ///
    /// - `AuthenticationError` if the email is unknown or the password is wrong
    /// - `InternalError` for token-signing or database errors
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutcome, AuthServiceError> {
        let user = self
            .user_repo
            .get_by_email(&input.email)
            .await
            .context("Failed to get user by email")?
            .ok_or_else(|| {
                AuthServiceError::AuthenticationError("Invalid credentials".to_string())
            })?;

        let password_valid = verify_password(&input.password, &user.password_hash)
            .context("Failed to verify password")?;

        if !password_valid {
            return Err(AuthServiceError::AuthenticationError(
                "Invalid credentials".to_string(),
            ));
        }

        let token = encode_token(
            &user.id,
            &user.email,
            &self.jwt_secret,
            self.token_expiry_hours,
        )
        .context("Failed to sign login token")?;

        Ok(LoginOutcome { token, user })
    }

    /// Resolve a bearer token to its user
    ///
    /// # Errors
    ///
    /// - `AuthenticationError` if the token is malformed, expired, or
    ///   mis-signed
    /// - `NotFound` if the token is valid but the user row is gone
    pub async fn get_user_from_token(&self, token: &str) -> Result<User, AuthServiceError> {
        let claims = decode_token(token, &self.jwt_secret)
            .map_err(|_| AuthServiceError::AuthenticationError("Invalid token".to_string()))?;

        let user = self
            .user_repo
            .get_by_id(&claims.sub)
            .await
            .context("Failed to get user")?
            .ok_or_else(|| AuthServiceError::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    // ========================================================================
    // Private helper methods
    // ========================================================================

    /// Validate signup input
    fn validate_signup_input(&self, input: &SignupInput) -> Result<(), AuthServiceError> {
        if input.name.trim().is_empty() {
            return Err(AuthServiceError::ValidationError(
                "Name cannot be empty".to_string(),
            ));
        }

        if input.email.trim().is_empty() {
            return Err(AuthServiceError::ValidationError(
                "Email cannot be empty".to_string(),
            ));
        }

        if input.phone.trim().is_empty() {
            return Err(AuthServiceError::ValidationError(
                "Phone cannot be empty".to_string(),
            ));
        }

        if input.password.is_empty() {
            return Err(AuthServiceError::ValidationError(
                "Password cannot be empty".to_string(),
            ));
        }

        if !EMAIL_RE.is_match(&input.email) {
            return Err(AuthServiceError::ValidationError(
                "Invalid email format".to_string(),
            ));
        }

        Ok(())
    }
}
