//! Home-page content route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::models::content::HomeContent;
use crate::state::AppState;

/// The full home-page payload: hero slides, highlights, category tiles,
/// showcase section, brand story, and logo settings.
///
/// Served from the in-process cache; see [`AppState::home_content`].
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeContent>> {
    let content = state.home_content().await?;
    Ok(Json(HomeContent::clone(&content)))
}
