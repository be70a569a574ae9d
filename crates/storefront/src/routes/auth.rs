//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::OptionalAuth;
use crate::models::session::{CurrentUser, keys};
use crate::models::user::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The session user returned by register/login/me.
#[derive(Debug, Serialize)]
pub struct SessionUserResponse {
    pub id: i32,
    pub email: String,
    pub display_name: String,
}

impl From<&CurrentUser> for SessionUserResponse {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id.as_i32(),
            email: user.email.to_string(),
            display_name: user.display_name.clone(),
        }
    }
}

/// Store the user in the session and bind Sentry context.
async fn establish_session(session: &Session, user: &User) -> Result<CurrentUser> {
    // Rotate the session id on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session rotation failed: {e}")))?;

    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
        display_name: user.display_name.clone(),
    };
    session
        .insert(keys::CURRENT_USER, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(current)
}

/// Create an account and sign in.
#[instrument(skip(state, session, request))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionUserResponse>)> {
    let user = AuthService::new(state.pool())
        .register(&request.email, &request.display_name, &request.password)
        .await?;

    let current = establish_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, "account registered");

    Ok((StatusCode::CREATED, Json((&current).into())))
}

/// Sign in with email and password.
#[instrument(skip(state, session, request))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionUserResponse>> {
    let user = AuthService::new(state.pool())
        .login(&request.email, &request.password)
        .await?;

    let current = establish_session(&session, &user).await?;

    Ok(Json((&current).into()))
}

/// Sign out: destroy the session entirely.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("session flush failed: {e}")))?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

/// Current session user, or 401 when signed out.
#[instrument(skip(auth))]
pub async fn me(OptionalAuth(auth): OptionalAuth) -> Result<Json<SessionUserResponse>> {
    let user = auth.ok_or_else(|| AppError::Unauthorized("not signed in".to_string()))?;
    Ok(Json((&user).into()))
}
