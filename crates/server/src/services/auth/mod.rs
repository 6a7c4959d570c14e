//! Credential store: registration, authentication, and account management.
//!
//! Passwords are hashed with argon2id; only the hash is stored, and the
//! plaintext is never logged or returned. Verification goes through
//! argon2's `PasswordVerifier`, whose comparison is constant-time-safe.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use clementine_core::{DisplayColor, Email, PublicId, UserId, validate_password_strength};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Credential store service.
///
/// Handles registration, login, profile updates, and account deletion.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new credential store service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account with email and password.
    ///
    /// Assigns a random bright display color. Stores only the argon2 hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password fails the strength
    /// policy (min 8 chars; lowercase, uppercase, digit, symbol).
    /// Returns `AuthError::AlreadyExists` if the email is taken.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password_strength(password)?;

        let password_hash = hash_password(password)?;
        let color = DisplayColor::random();

        let user = self
            .users
            .create(&email, &password_hash, &color)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::AlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user = %user.public_id, "account registered");

        Ok(user)
    }

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::NotFound` if no account matches the email.
    /// Returns `AuthError::InvalidCredentials` if the password is wrong.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::NotFound)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Look up an account by its opaque external identifier.
    ///
    /// Used by the auth middleware to resolve verified token claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the account doesn't exist.
    pub async fn get_by_public_id(&self, public_id: PublicId) -> Result<User, AuthError> {
        self.users
            .get_by_public_id(public_id)
            .await?
            .ok_or(AuthError::NotFound)
    }

    /// Update profile fields (phone, address).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the account doesn't exist.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        phone: &str,
        address: &str,
    ) -> Result<User, AuthError> {
        self.users
            .update_profile(user_id, phone, address)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::NotFound,
                other => AuthError::Repository(other),
            })
    }

    /// Delete an account; cart lines, ratings, and comments cascade.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the account doesn't exist.
    pub async fn delete_account(&self, user_id: UserId) -> Result<(), AuthError> {
        let deleted = self.users.delete(user_id).await?;
        if !deleted {
            return Err(AuthError::NotFound);
        }

        tracing::info!(user_id = %user_id, "account deleted");

        Ok(())
    }
}

/// Hash a password using argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("Str0ng!pass").unwrap();
        assert!(verify_password("Str0ng!pass", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("Str0ng!pass").unwrap();
        assert!(matches!(
            verify_password("Wr0ng!pass", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hash_is_not_plaintext_and_salted() {
        let a = hash_password("Str0ng!pass").unwrap();
        let b = hash_password("Str0ng!pass").unwrap();
        assert!(!a.contains("Str0ng!pass"));
        // Different salts produce different hashes for the same input
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_stored_hash_rejected() {
        assert!(matches!(
            verify_password("Str0ng!pass", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
