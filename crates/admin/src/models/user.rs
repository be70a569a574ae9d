//! Account model as seen from the admin console.

use chrono::{DateTime, Utc};
use serde::Serialize;

use apexdrive_core::{Email, UserId, UserRole};

/// A site account (customer or admin).
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub display_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
