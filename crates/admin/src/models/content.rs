//! Home-page content blocks as edited in the admin console.
//!
//! Same tables the storefront reads, but the admin sees disabled rows too
//! and carries `updated_at` for the editor UI.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use apexdrive_core::{CategoryTileId, HeroSlideId, HighlightId};

/// One slide of the home-page hero carousel.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HeroSlide {
    pub id: HeroSlideId,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub cta_label: String,
    pub cta_href: String,
    pub text_color: String,
    pub overlay_color: String,
    pub overlay_opacity: f32,
    pub sort_order: i32,
    pub enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// A feature/benefit card shown under the hero.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Highlight {
    pub id: HighlightId,
    pub title: String,
    pub body: String,
    pub icon: String,
    pub image_url: String,
    pub accent_color: String,
    pub sort_order: i32,
    pub enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// A category navigation tile with image filter styling.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryTile {
    pub id: CategoryTileId,
    pub label: String,
    pub category: String,
    pub image_url: String,
    pub brightness_percent: i32,
    pub grayscale_percent: i32,
    pub text_align: String,
    pub sort_order: i32,
    pub enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// Full-bleed promotional section (singleton).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShowcaseSection {
    pub heading: String,
    pub tagline: String,
    pub body: String,
    pub image_url: String,
    pub cta_label: String,
    pub cta_href: String,
    pub text_color: String,
    pub enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// About-the-brand section (singleton).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BrandStory {
    pub heading: String,
    pub body: String,
    pub image_url: String,
    pub enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// Site branding (singleton).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LogoSettings {
    pub logo_url: String,
    pub alt_text: String,
    pub width_px: i32,
    pub show_wordmark: bool,
    pub updated_at: DateTime<Utc>,
}
