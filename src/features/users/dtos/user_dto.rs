use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::shared::validation::{FieldErrors, EMAIL_REGEX};

pub const EMAIL_TAKEN_MESSAGE: &str = "has already been taken";
pub const CONFIRMATION_MISMATCH_MESSAGE: &str = "doesn't match Password";

/// Signup fields, submitted either as an HTML form or as JSON.
///
/// `SignupRequestDto::default()` is the blank form shown on `GET /signup`.
#[derive(Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignupRequestDto {
    #[serde(default)]
    #[validate(regex(path = *EMAIL_REGEX, message = "is invalid"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "is too short (minimum is 8 characters)"))]
    pub password: String,

    /// Checked against `password` only when present
    #[serde(default)]
    pub password_confirmation: Option<String>,
}

impl fmt::Debug for SignupRequestDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequestDto")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field(
                "password_confirmation",
                &self.password_confirmation.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl SignupRequestDto {
    /// Strip surrounding whitespace from the email; passwords are kept verbatim
    pub fn normalized(mut self) -> Self {
        let trimmed = self.email.trim();
        if trimmed.len() != self.email.len() {
            self.email = trimmed.to_string();
        }
        self
    }

    /// Run every field rule that does not need storage and collect all failures
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(&e),
        };

        if let Some(confirmation) = &self.password_confirmation {
            if confirmation != &self.password {
                errors.add("password_confirmation", CONFIRMATION_MISMATCH_MESSAGE);
            }
        }

        errors
    }
}

/// Request DTO for login
#[derive(Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

impl fmt::Debug for LoginRequestDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequestDto")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Public view of an account; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
