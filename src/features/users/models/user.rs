use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::users::dtos::UserResponseDto;
use crate::features::users::password::PasswordHash;

/// Database model for an account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Argon2id PHC string; the plaintext password is never stored
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn password_hash(&self) -> PasswordHash {
        PasswordHash::new(self.password_hash.clone())
    }
}

/// A validated account ready to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: PasswordHash,
}

impl NewUser {
    pub fn new(email: String, password_hash: PasswordHash) -> Self {
        Self {
            id: Uuid::now_v7(),
            email,
            password_hash,
        }
    }
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            created_at: u.created_at,
        }
    }
}
