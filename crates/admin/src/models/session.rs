//! Session-stored admin identity.

use serde::{Deserialize, Serialize};

use apexdrive_core::{Email, UserId};

/// Minimal identity stored in the admin session.
///
/// Role is re-checked at login only; revoking admin rights takes effect
/// when the session expires or the operator logs out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: UserId,
    pub email: Email,
    pub display_name: String,
}

/// Session keys for admin session data.
pub mod session_keys {
    /// Key for the logged-in admin identity.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
