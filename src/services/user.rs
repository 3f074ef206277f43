//! User service
//!
//! Administrative user listing and creation. Signup and login live in
//! the auth service; this one backs the plain user CRUD endpoints.

use crate::db::repositories::UserRepository;
use crate::models::{CreateUserInput, User};
use crate::services::password::hash_password;
use anyhow::{Context, Result};
use std::sync::Arc;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.repo.list().await
    }

    /// Create a user directly, defaulting the role to `user` when omitted.
    ///
    /// The password arrives in plaintext and is hashed before storage.
    pub async fn create(&self, input: CreateUserInput) -> Result<User> {
        let password_hash = hash_password(&input.password).context("Failed to hash password")?;

        let user = User::new(
            input.name,
            input.email,
            password_hash,
            input.phone,
            input.role.unwrap_or_default(),
        );

        self.repo.create(&user).await.context("Failed to create user")
    }
}
