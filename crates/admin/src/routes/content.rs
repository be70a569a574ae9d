//! Home-page content route handlers.
//!
//! The storefront caches the assembled home payload for a minute, so edits
//! made here appear on the shop shortly after saving.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use apexdrive_core::{CategoryTileId, HeroSlideId, HighlightId};

use crate::db::ContentRepository;
use crate::db::content::{
    BrandStoryInput, CategoryTileInput, HeroSlideInput, HighlightInput, LogoInput, ShowcaseInput,
};
use crate::error::{AdminError, Result};
use crate::middleware::RequireAdmin;
use crate::models::content::{
    BrandStory, CategoryTile, HeroSlide, Highlight, LogoSettings, ShowcaseSection,
};
use crate::state::AppState;

const TEXT_ALIGNMENTS: &[&str] = &["left", "center", "right"];

// =============================================================================
// Request Types
// =============================================================================

/// Hero slide create/update request body.
#[derive(Debug, Deserialize)]
pub struct HeroSlideRequest {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub image_url: String,
    #[serde(default)]
    pub cta_label: String,
    #[serde(default)]
    pub cta_href: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_overlay_color")]
    pub overlay_color: String,
    #[serde(default = "default_overlay_opacity")]
    pub overlay_opacity: f32,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_text_color() -> String {
    "#ffffff".to_string()
}

fn default_overlay_color() -> String {
    "#000000".to_string()
}

const fn default_overlay_opacity() -> f32 {
    0.4
}

const fn default_enabled() -> bool {
    true
}

impl HeroSlideRequest {
    fn into_input(self) -> Result<HeroSlideInput> {
        if self.title.trim().is_empty() {
            return Err(AdminError::BadRequest("title is required".to_string()));
        }
        if self.image_url.trim().is_empty() {
            return Err(AdminError::BadRequest("image_url is required".to_string()));
        }
        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(AdminError::BadRequest(
                "overlay_opacity must be between 0 and 1".to_string(),
            ));
        }

        Ok(HeroSlideInput {
            title: self.title,
            subtitle: self.subtitle,
            image_url: self.image_url,
            cta_label: self.cta_label,
            cta_href: self.cta_href,
            text_color: self.text_color,
            overlay_color: self.overlay_color,
            overlay_opacity: self.overlay_opacity,
            sort_order: self.sort_order,
            enabled: self.enabled,
        })
    }
}

/// Highlight create/update request body.
#[derive(Debug, Deserialize)]
pub struct HighlightRequest {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_accent_color() -> String {
    "#e10600".to_string()
}

impl HighlightRequest {
    fn into_input(self) -> Result<HighlightInput> {
        if self.title.trim().is_empty() {
            return Err(AdminError::BadRequest("title is required".to_string()));
        }

        Ok(HighlightInput {
            title: self.title,
            body: self.body,
            icon: self.icon,
            image_url: self.image_url,
            accent_color: self.accent_color,
            sort_order: self.sort_order,
            enabled: self.enabled,
        })
    }
}

/// Category tile create/update request body.
#[derive(Debug, Deserialize)]
pub struct CategoryTileRequest {
    pub label: String,
    pub category: String,
    pub image_url: String,
    #[serde(default = "default_brightness")]
    pub brightness_percent: i32,
    #[serde(default)]
    pub grayscale_percent: i32,
    #[serde(default = "default_text_align")]
    pub text_align: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_brightness() -> i32 {
    100
}

fn default_text_align() -> String {
    "center".to_string()
}

impl CategoryTileRequest {
    fn into_input(self) -> Result<CategoryTileInput> {
        if self.label.trim().is_empty() {
            return Err(AdminError::BadRequest("label is required".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(AdminError::BadRequest("category is required".to_string()));
        }
        if self.image_url.trim().is_empty() {
            return Err(AdminError::BadRequest("image_url is required".to_string()));
        }
        if !(0..=200).contains(&self.brightness_percent) {
            return Err(AdminError::BadRequest(
                "brightness_percent must be between 0 and 200".to_string(),
            ));
        }
        if !(0..=100).contains(&self.grayscale_percent) {
            return Err(AdminError::BadRequest(
                "grayscale_percent must be between 0 and 100".to_string(),
            ));
        }
        if !TEXT_ALIGNMENTS.contains(&self.text_align.as_str()) {
            return Err(AdminError::BadRequest(
                "text_align must be left, center, or right".to_string(),
            ));
        }

        Ok(CategoryTileInput {
            label: self.label,
            category: self.category,
            image_url: self.image_url,
            brightness_percent: self.brightness_percent,
            grayscale_percent: self.grayscale_percent,
            text_align: self.text_align,
            sort_order: self.sort_order,
            enabled: self.enabled,
        })
    }
}

/// Showcase section save request body.
#[derive(Debug, Deserialize)]
pub struct ShowcaseRequest {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub cta_label: String,
    #[serde(default)]
    pub cta_href: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default)]
    pub enabled: bool,
}

/// Brand story save request body.
#[derive(Debug, Deserialize)]
pub struct BrandStoryRequest {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub enabled: bool,
}

/// Branding save request body.
#[derive(Debug, Deserialize)]
pub struct LogoRequest {
    #[serde(default)]
    pub logo_url: String,
    #[serde(default = "default_alt_text")]
    pub alt_text: String,
    #[serde(default = "default_logo_width")]
    pub width_px: i32,
    #[serde(default = "default_enabled")]
    pub show_wordmark: bool,
}

fn default_alt_text() -> String {
    "Apex Drive".to_string()
}

const fn default_logo_width() -> i32 {
    160
}

// =============================================================================
// Hero Slides
// =============================================================================

/// All hero slides, disabled ones included.
#[instrument(skip(state, _admin))]
pub async fn list_hero_slides(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<HeroSlide>>> {
    let slides = ContentRepository::new(state.pool()).hero_slides().await?;
    Ok(Json(slides))
}

/// Create a hero slide.
#[instrument(skip(state, _admin, request))]
pub async fn create_hero_slide(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<HeroSlideRequest>,
) -> Result<(StatusCode, Json<HeroSlide>)> {
    let slide = ContentRepository::new(state.pool())
        .create_hero_slide(request.into_input()?)
        .await?;

    Ok((StatusCode::CREATED, Json(slide)))
}

/// Replace a hero slide's fields.
#[instrument(skip(state, _admin, request))]
pub async fn update_hero_slide(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<HeroSlideRequest>,
) -> Result<Json<HeroSlide>> {
    let slide = ContentRepository::new(state.pool())
        .update_hero_slide(HeroSlideId::new(id), request.into_input()?)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("hero slide {id}")))?;

    Ok(Json(slide))
}

/// Delete a hero slide.
#[instrument(skip(state, _admin))]
pub async fn delete_hero_slide(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let deleted = ContentRepository::new(state.pool())
        .delete_hero_slide(HeroSlideId::new(id))
        .await?;

    if !deleted {
        return Err(AdminError::NotFound(format!("hero slide {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Highlights
// =============================================================================

/// All highlight cards, disabled ones included.
#[instrument(skip(state, _admin))]
pub async fn list_highlights(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Highlight>>> {
    let highlights = ContentRepository::new(state.pool()).highlights().await?;
    Ok(Json(highlights))
}

/// Create a highlight card.
#[instrument(skip(state, _admin, request))]
pub async fn create_highlight(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<HighlightRequest>,
) -> Result<(StatusCode, Json<Highlight>)> {
    let highlight = ContentRepository::new(state.pool())
        .create_highlight(request.into_input()?)
        .await?;

    Ok((StatusCode::CREATED, Json(highlight)))
}

/// Replace a highlight's fields.
#[instrument(skip(state, _admin, request))]
pub async fn update_highlight(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<HighlightRequest>,
) -> Result<Json<Highlight>> {
    let highlight = ContentRepository::new(state.pool())
        .update_highlight(HighlightId::new(id), request.into_input()?)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("highlight {id}")))?;

    Ok(Json(highlight))
}

/// Delete a highlight.
#[instrument(skip(state, _admin))]
pub async fn delete_highlight(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let deleted = ContentRepository::new(state.pool())
        .delete_highlight(HighlightId::new(id))
        .await?;

    if !deleted {
        return Err(AdminError::NotFound(format!("highlight {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Category Tiles
// =============================================================================

/// All category tiles, disabled ones included.
#[instrument(skip(state, _admin))]
pub async fn list_category_tiles(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryTile>>> {
    let tiles = ContentRepository::new(state.pool()).category_tiles().await?;
    Ok(Json(tiles))
}

/// Create a category tile.
#[instrument(skip(state, _admin, request))]
pub async fn create_category_tile(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<CategoryTileRequest>,
) -> Result<(StatusCode, Json<CategoryTile>)> {
    let tile = ContentRepository::new(state.pool())
        .create_category_tile(request.into_input()?)
        .await?;

    Ok((StatusCode::CREATED, Json(tile)))
}

/// Replace a category tile's fields.
#[instrument(skip(state, _admin, request))]
pub async fn update_category_tile(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CategoryTileRequest>,
) -> Result<Json<CategoryTile>> {
    let tile = ContentRepository::new(state.pool())
        .update_category_tile(CategoryTileId::new(id), request.into_input()?)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("category tile {id}")))?;

    Ok(Json(tile))
}

/// Delete a category tile.
#[instrument(skip(state, _admin))]
pub async fn delete_category_tile(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let deleted = ContentRepository::new(state.pool())
        .delete_category_tile(CategoryTileId::new(id))
        .await?;

    if !deleted {
        return Err(AdminError::NotFound(format!("category tile {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Singletons
// =============================================================================

/// The showcase section, or 404 before first save.
#[instrument(skip(state, _admin))]
pub async fn get_showcase(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<ShowcaseSection>> {
    let section = ContentRepository::new(state.pool())
        .showcase()
        .await?
        .ok_or_else(|| AdminError::NotFound("showcase section".to_string()))?;

    Ok(Json(section))
}

/// Save the showcase section.
#[instrument(skip(state, _admin, request))]
pub async fn save_showcase(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<ShowcaseRequest>,
) -> Result<Json<ShowcaseSection>> {
    let section = ContentRepository::new(state.pool())
        .upsert_showcase(ShowcaseInput {
            heading: request.heading,
            tagline: request.tagline,
            body: request.body,
            image_url: request.image_url,
            cta_label: request.cta_label,
            cta_href: request.cta_href,
            text_color: request.text_color,
            enabled: request.enabled,
        })
        .await?;

    Ok(Json(section))
}

/// The brand story section, or 404 before first save.
#[instrument(skip(state, _admin))]
pub async fn get_brand_story(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<BrandStory>> {
    let story = ContentRepository::new(state.pool())
        .brand_story()
        .await?
        .ok_or_else(|| AdminError::NotFound("brand story".to_string()))?;

    Ok(Json(story))
}

/// Save the brand story section.
#[instrument(skip(state, _admin, request))]
pub async fn save_brand_story(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<BrandStoryRequest>,
) -> Result<Json<BrandStory>> {
    let story = ContentRepository::new(state.pool())
        .upsert_brand_story(BrandStoryInput {
            heading: request.heading,
            body: request.body,
            image_url: request.image_url,
            enabled: request.enabled,
        })
        .await?;

    Ok(Json(story))
}

/// The branding settings, or 404 before first save.
#[instrument(skip(state, _admin))]
pub async fn get_logo(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<LogoSettings>> {
    let logo = ContentRepository::new(state.pool())
        .logo()
        .await?
        .ok_or_else(|| AdminError::NotFound("logo settings".to_string()))?;

    Ok(Json(logo))
}

/// Save the branding settings.
#[instrument(skip(state, _admin, request))]
pub async fn save_logo(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<LogoRequest>,
) -> Result<Json<LogoSettings>> {
    if request.width_px <= 0 {
        return Err(AdminError::BadRequest(
            "width_px must be positive".to_string(),
        ));
    }

    let logo = ContentRepository::new(state.pool())
        .upsert_logo(LogoInput {
            logo_url: request.logo_url,
            alt_text: request.alt_text,
            width_px: request.width_px,
            show_wordmark: request.show_wordmark,
        })
        .await?;

    Ok(Json(logo))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide() -> HeroSlideRequest {
        HeroSlideRequest {
            title: "Winter sale".to_string(),
            subtitle: String::new(),
            image_url: "https://img.test/hero.jpg".to_string(),
            cta_label: String::new(),
            cta_href: String::new(),
            text_color: default_text_color(),
            overlay_color: default_overlay_color(),
            overlay_opacity: 0.4,
            sort_order: 0,
            enabled: true,
        }
    }

    #[test]
    fn slide_without_image_rejected() {
        let mut r = slide();
        r.image_url = String::new();
        assert!(matches!(r.into_input(), Err(AdminError::BadRequest(_))));
    }

    #[test]
    fn slide_opacity_out_of_range_rejected() {
        let mut r = slide();
        r.overlay_opacity = 1.5;
        assert!(matches!(r.into_input(), Err(AdminError::BadRequest(_))));
    }

    #[test]
    fn tile_alignment_validated() {
        let tile = CategoryTileRequest {
            label: "Wheels".to_string(),
            category: "Wheels".to_string(),
            image_url: "https://img.test/wheels.jpg".to_string(),
            brightness_percent: 100,
            grayscale_percent: 0,
            text_align: "justify".to_string(),
            sort_order: 0,
            enabled: true,
        };
        assert!(matches!(
            tile.into_input(),
            Err(AdminError::BadRequest(_))
        ));
    }
}
