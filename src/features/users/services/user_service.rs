use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{SignupRequestDto, EMAIL_TAKEN_MESSAGE};
use crate::features::users::models::{NewUser, User};
use crate::features::users::password::{PasswordService, PlainPassword};
use crate::features::users::repositories::UserRepository;
use crate::shared::validation::FieldErrors;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Account creation and credential checks
pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: PasswordService,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: PasswordService) -> Self {
        Self { users, passwords }
    }

    /// Validate the submitted fields and create the account.
    ///
    /// All rule violations are reported together as [`AppError::Validation`];
    /// nothing is written unless every rule passes.
    pub async fn signup(&self, dto: SignupRequestDto) -> Result<User> {
        let dto = dto.normalized();
        let mut errors = dto.field_errors();

        // Only a well-formed email is worth a lookup
        if !errors.contains("email") && self.users.find_by_email(&dto.email).await?.is_some() {
            errors.add("email", EMAIL_TAKEN_MESSAGE);
        }

        if !errors.is_empty() {
            tracing::info!(
                "Signup rejected: {} rule violation(s)",
                errors.full_messages().len()
            );
            return Err(AppError::Validation(errors.full_messages()));
        }

        let password_hash = self.passwords.hash(PlainPassword::new(dto.password)).await?;

        match self.users.insert(NewUser::new(dto.email, password_hash)).await? {
            Some(user) => {
                tracing::info!(user_id = %user.id, "User signed up");
                Ok(user)
            }
            None => {
                // Another signup for the same email committed between our check and insert
                tracing::info!("Signup rejected: email claimed concurrently");
                let mut errors = FieldErrors::new();
                errors.add("email", EMAIL_TAKEN_MESSAGE);
                Err(AppError::Validation(errors.full_messages()))
            }
        }
    }

    /// Check `password` against the stored hash for `email`
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let Some(user) = self.users.find_by_email(email.trim()).await? else {
            self.passwords
                .verify_dummy(PlainPassword::new(password))
                .await?;
            tracing::info!("Login failed: unknown email");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let result = self
            .passwords
            .verify(PlainPassword::new(password), user.password_hash())
            .await?;

        if result.is_match() {
            tracing::info!(user_id = %user.id, "Login succeeded");
            Ok(user)
        } else {
            tracing::info!(user_id = %user.id, "Login failed: password mismatch");
            Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
        }
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<User>> {
        self.users.find_by_id(id).await
    }
}
