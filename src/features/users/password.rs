//! Password hashing with Argon2id.
//!
//! Hashes are salted PHC strings (`$argon2id$v=19$m=...`). Hashing and
//! verification are CPU-bound and run on the blocking thread pool.

use std::fmt;

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash as Argon2PasswordHash, PasswordHasher as _,
        PasswordVerifier as _, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::core::config::PasswordConfig;
use crate::core::error::{AppError, Result};

/// Plaintext password as submitted by the user.
///
/// Debug output is masked.
#[derive(Clone)]
pub struct PlainPassword(String);

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

impl PlainPassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Argon2id PHC string as persisted in `users.password_hash`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
    Match,
    Mismatch,
}

impl PasswordVerifyResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

impl From<bool> for PasswordVerifyResult {
    fn from(matched: bool) -> Self {
        if matched {
            Self::Match
        } else {
            Self::Mismatch
        }
    }
}

/// Hashes new passwords and verifies submitted ones against stored hashes
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
    /// Verified against when the account does not exist, so that unknown
    /// emails take as long to reject as wrong passwords
    dummy_hash: PasswordHash,
}

impl PasswordService {
    pub fn new(config: &PasswordConfig) -> Result<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Invalid Argon2 parameters: {}", e)))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_hash = hash_with(&argon2, "timing-equalization-placeholder")?;

        Ok(Self { argon2, dummy_hash })
    }

    pub async fn hash(&self, password: PlainPassword) -> Result<PasswordHash> {
        let argon2 = self.argon2.clone();
        tokio::task::spawn_blocking(move || hash_with(&argon2, password.as_str()))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    pub async fn verify(
        &self,
        password: PlainPassword,
        hash: PasswordHash,
    ) -> Result<PasswordVerifyResult> {
        let argon2 = self.argon2.clone();
        tokio::task::spawn_blocking(move || verify_with(&argon2, password.as_str(), &hash))
            .await
            .map_err(|e| {
                AppError::Internal(format!("Password verification task failed: {}", e))
            })?
    }

    /// Burn one verification against a throwaway hash; the outcome is ignored
    pub async fn verify_dummy(&self, password: PlainPassword) -> Result<()> {
        self.verify(password, self.dummy_hash.clone()).await?;
        Ok(())
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<PasswordHash> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordHash::new(hash.to_string()))
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

fn verify_with(
    argon2: &Argon2<'_>,
    password: &str,
    hash: &PasswordHash,
) -> Result<PasswordVerifyResult> {
    let parsed = Argon2PasswordHash::new(hash.as_str())
        .map_err(|e| AppError::Internal(format!("Malformed password hash: {}", e)))?;

    let matched = argon2
        .verify_password(password.as_bytes(), &parsed)
        .is_ok();

    Ok(PasswordVerifyResult::from(matched))
}
