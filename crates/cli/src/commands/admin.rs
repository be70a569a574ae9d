//! Account role management commands.
//!
//! Accounts self-register through the storefront; operators are promoted
//! here (or from the admin console by an existing admin). The first admin
//! of a fresh install has to come from this command.

use apexdrive_admin::db::{self, UserRepository};
use apexdrive_core::{Email, UserRole};

use super::{CommandError, database_url};

/// Promote an existing account to admin.
///
/// # Errors
///
/// Returns an error for an invalid or unknown email, or on database failure.
pub async fn promote(email: &str) -> Result<(), CommandError> {
    set_role(email, UserRole::Admin).await
}

/// Demote an admin back to a regular account.
///
/// # Errors
///
/// Returns an error for an invalid or unknown email, or on database failure.
pub async fn demote(email: &str) -> Result<(), CommandError> {
    set_role(email, UserRole::User).await
}

async fn set_role(email: &str, role: UserRole) -> Result<(), CommandError> {
    let email =
        Email::parse(email).map_err(|e| CommandError::Invalid(format!("invalid email: {e}")))?;

    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let users = UserRepository::new(&pool);
    let Some(user) = users.get_by_email(&email).await? else {
        return Err(CommandError::Invalid(format!(
            "no account found for {email}"
        )));
    };

    if user.role == role {
        tracing::info!("{email} already has role {role}");
        return Ok(());
    }

    users.set_role(user.id, role).await?;
    tracing::info!("{email} is now {role}");

    Ok(())
}
