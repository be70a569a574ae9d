//! Admin authentication service.
//!
//! Admins log in with the same email/password credentials as the
//! storefront, but the login is only accepted when the account's role is
//! `admin`. A customer account at the admin login gets the same error as a
//! wrong password, so the endpoint does not reveal which emails are staff.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use sqlx::PgPool;
use thiserror::Error;

use apexdrive_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::User;

/// Errors that can occur during admin authentication.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Wrong email, wrong password, or not an admin account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Stored password hash could not be parsed.
    #[error("password hash error: {0}")]
    PasswordHash(String),
}

/// Admin authentication service.
pub struct AdminAuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Verify credentials and the admin role, returning the account.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidCredentials` for an unknown email,
    /// wrong password, or non-admin account.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AdminAuthError> {
        let email = Email::parse(email).map_err(|_| AdminAuthError::InvalidCredentials)?;

        let Some((user, password_hash)) = self.users.get_password_hash(&email).await? else {
            return Err(AdminAuthError::InvalidCredentials);
        };

        verify_password(password, &password_hash)?;

        if !user.role.is_admin() {
            tracing::warn!(user_id = %user.id, "non-admin account attempted admin login");
            return Err(AdminAuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

/// Verify a password against an Argon2 hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AdminAuthError> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| AdminAuthError::PasswordHash(e.to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AdminAuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};

    fn hash(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("hashing")
            .to_string()
    }

    #[test]
    fn correct_password_verifies() {
        let h = hash("pit-crew-only-9$");
        assert!(verify_password("pit-crew-only-9$", &h).is_ok());
    }

    #[test]
    fn wrong_password_rejected() {
        let h = hash("pit-crew-only-9$");
        assert!(matches!(
            verify_password("guess", &h),
            Err(AdminAuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn garbage_hash_is_reported() {
        assert!(matches!(
            verify_password("anything", "not-a-hash"),
            Err(AdminAuthError::PasswordHash(_))
        ));
    }
}
