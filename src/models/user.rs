//! User model
//!
//! This module defines the User entity and related types for the booking
//! backend. Passwords are stored as argon2 hashes and never serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// User entity representing a registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUID)
    pub id: String,
    /// Display name (unique)
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// Password hash (argon2)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Contact phone number
    #[serde(default)]
    pub phone: String,
    /// User role
    #[serde(default)]
    pub role: UserRole,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with a generated id.
    ///
    /// The password must already be hashed. Use
    /// `services::password::hash_password()` first.
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        phone: String,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            phone,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the user is an administrator
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Administrator
    Admin,
    /// Regular user
    User,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::User => write!(f, "user"),
        }
    }
}

impl FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "user" => Ok(UserRole::User),
            _ => Err(anyhow::anyhow!("Invalid user role: {}", s)),
        }
    }
}

/// Input for the signup endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupInput {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Plaintext password (will be hashed)
    pub password: String,
}

/// Input for the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    /// Email address
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Input for the administrative user-creation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserInput {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Plaintext password (will be hashed)
    pub password: String,
    /// Contact phone number
    #[serde(default)]
    pub phone: String,
    /// Role; "user" when omitted
    pub role: Option<UserRole>,
}
