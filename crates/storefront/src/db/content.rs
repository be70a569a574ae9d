//! Content repository: home-page block reads.
//!
//! Every query orders by `sort_order, id` so ties are deterministic, and
//! only enabled records are returned; the admin service sees the full set
//! through its own repository.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::content::{
    BrandStory, CategoryTile, HeroSlide, Highlight, HomeContent, LogoSettings, ShowcaseSection,
};

/// Repository for public content reads.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Assemble the full home-page payload.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn home(&self) -> Result<HomeContent, RepositoryError> {
        Ok(HomeContent {
            hero_slides: self.hero_slides().await?,
            highlights: self.highlights().await?,
            category_tiles: self.category_tiles().await?,
            showcase: self.showcase().await?,
            brand_story: self.brand_story().await?,
            logo: self.logo().await?,
        })
    }

    /// Enabled hero slides in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn hero_slides(&self) -> Result<Vec<HeroSlide>, RepositoryError> {
        let slides = sqlx::query_as::<_, HeroSlide>(
            "SELECT id, title, subtitle, image_url, cta_label, cta_href, text_color, \
                    overlay_color, overlay_opacity, sort_order, enabled \
             FROM hero_slide WHERE enabled ORDER BY sort_order, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(slides)
    }

    /// Enabled highlights in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn highlights(&self) -> Result<Vec<Highlight>, RepositoryError> {
        let highlights = sqlx::query_as::<_, Highlight>(
            "SELECT id, title, body, icon, image_url, accent_color, sort_order, enabled \
             FROM highlight WHERE enabled ORDER BY sort_order, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(highlights)
    }

    /// Enabled category tiles in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn category_tiles(&self) -> Result<Vec<CategoryTile>, RepositoryError> {
        let tiles = sqlx::query_as::<_, CategoryTile>(
            "SELECT id, label, category, image_url, brightness_percent, grayscale_percent, \
                    text_align, sort_order, enabled \
             FROM category_tile WHERE enabled ORDER BY sort_order, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(tiles)
    }

    /// The showcase section, if present and enabled.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn showcase(&self) -> Result<Option<ShowcaseSection>, RepositoryError> {
        let section = sqlx::query_as::<_, ShowcaseSection>(
            "SELECT heading, tagline, body, image_url, cta_label, cta_href, text_color, enabled \
             FROM showcase_section WHERE id = 1 AND enabled",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(section)
    }

    /// The brand story, if present and enabled.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn brand_story(&self) -> Result<Option<BrandStory>, RepositoryError> {
        let story = sqlx::query_as::<_, BrandStory>(
            "SELECT heading, body, image_url, enabled \
             FROM brand_story WHERE id = 1 AND enabled",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(story)
    }

    /// Logo settings, if configured.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn logo(&self) -> Result<Option<LogoSettings>, RepositoryError> {
        let logo = sqlx::query_as::<_, LogoSettings>(
            "SELECT logo_url, alt_text, width_px, show_wordmark \
             FROM logo_settings WHERE id = 1",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(logo)
    }
}
