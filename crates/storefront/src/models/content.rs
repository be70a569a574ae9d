//! Home-page content blocks.
//!
//! These are plain styling+content records edited in the admin console and
//! rendered by the client. Repeated blocks carry `sort_order` and `enabled`;
//! singleton blocks (showcase, brand story, logo) are one row each.

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
}

/// A short feature/benefit card shown under the hero.
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
}

/// About-the-brand section (singleton).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BrandStory {
    pub heading: String,
    pub body: String,
    pub image_url: String,
    pub enabled: bool,
}

/// Site branding (singleton).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LogoSettings {
    pub logo_url: String,
    pub alt_text: String,
    pub width_px: i32,
    pub show_wordmark: bool,
}

/// Everything the home page needs, assembled in one payload.
///
/// Disabled singletons come through as `None`; disabled repeated blocks are
/// filtered out by the queries.
#[derive(Debug, Clone, Serialize)]
pub struct HomeContent {
    pub hero_slides: Vec<HeroSlide>,
    pub highlights: Vec<Highlight>,
    pub category_tiles: Vec<CategoryTile>,
    pub showcase: Option<ShowcaseSection>,
    pub brand_story: Option<BrandStory>,
    pub logo: Option<LogoSettings>,
}
