//! Account management route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use apexdrive_core::{UserId, UserRole};

use crate::db::UserRepository;
use crate::error::{AdminError, Result};
use crate::middleware::RequireAdmin;
use crate::models::user::User;
use crate::state::AppState;

const DEFAULT_PER_PAGE: i64 = 50;
const MAX_PER_PAGE: i64 = 200;

/// Query parameters for the account list.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    /// 1-based page number.
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Account list payload.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Role update request body.
#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: UserRole,
}

/// Paginated account list, newest first.
#[instrument(skip(state, _admin))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<UserListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let offset = (page - 1) * per_page;

    let result = UserRepository::new(state.pool())
        .list(per_page, offset)
        .await?;

    Ok(Json(UserListResponse {
        users: result.users,
        total: result.total,
        page,
        per_page,
    }))
}

/// Set an account's role.
///
/// Self-demotion is allowed (the change takes effect on next login since
/// the session carries no role), but it is logged loudly.
#[instrument(skip(state, admin), fields(role = %request.role))]
pub async fn set_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<RoleRequest>,
) -> Result<Json<User>> {
    let target = UserId::new(id);

    if target == admin.id && !request.role.is_admin() {
        tracing::warn!(admin_id = %admin.id, "admin demoted their own account");
    }

    let user = UserRepository::new(state.pool())
        .set_role(target, request.role)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("user {id}")))?;

    tracing::info!(user_id = %user.id, role = %user.role, "account role updated");
    Ok(Json(user))
}
