//! Admin authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AdminError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::RequireAdmin;
use crate::models::{CurrentAdmin, session_keys};
use crate::services::auth::AdminAuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The admin identity returned by login/me.
#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub id: i32,
    pub email: String,
    pub display_name: String,
}

impl From<&CurrentAdmin> for AdminResponse {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            id: admin.id.as_i32(),
            email: admin.email.to_string(),
            display_name: admin.display_name.clone(),
        }
    }
}

/// Verify credentials and the admin role, then establish a session.
#[instrument(skip(state, session, request))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AdminResponse>> {
    let user = AdminAuthService::new(state.pool())
        .login(&request.email, &request.password)
        .await?;

    // Rotate the session id on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AdminError::Internal(format!("session rotation failed: {e}")))?;

    let admin = CurrentAdmin {
        id: user.id,
        email: user.email,
        display_name: user.display_name,
    };
    session
        .insert(session_keys::CURRENT_ADMIN, &admin)
        .await
        .map_err(|e| AdminError::Internal(format!("session write failed: {e}")))?;

    set_sentry_user(&admin.id, Some(admin.email.as_str()));
    tracing::info!(admin_id = %admin.id, "admin logged in");

    Ok(Json((&admin).into()))
}

/// Destroy the admin session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    session
        .flush()
        .await
        .map_err(|e| AdminError::Internal(format!("session flush failed: {e}")))?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

/// Current admin session, or 401 when signed out.
#[instrument(skip(admin))]
pub async fn me(RequireAdmin(admin): RequireAdmin) -> Json<AdminResponse> {
    Json((&admin).into())
}
