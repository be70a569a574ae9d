//! Home-page content repository for the admin console.
//!
//! Repeated blocks (hero slides, highlights, category tiles) get full CRUD.
//! Singleton blocks (showcase, brand story, logo) live in fixed single-row
//! tables and are written with `INSERT ... ON CONFLICT (id) DO UPDATE`, so
//! the first save creates the row and later saves replace it.

use sqlx::PgPool;

use apexdrive_core::{CategoryTileId, HeroSlideId, HighlightId};

use super::RepositoryError;
use crate::models::content::{
    BrandStory, CategoryTile, HeroSlide, Highlight, LogoSettings, ShowcaseSection,
};

/// Editable fields of a hero slide.
#[derive(Debug, Clone)]
pub struct HeroSlideInput {
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

/// Editable fields of a highlight card.
#[derive(Debug, Clone)]
pub struct HighlightInput {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub image_url: String,
    pub accent_color: String,
    pub sort_order: i32,
    pub enabled: bool,
}

/// Editable fields of a category tile.
#[derive(Debug, Clone)]
pub struct CategoryTileInput {
    pub label: String,
    pub category: String,
    pub image_url: String,
    pub brightness_percent: i32,
    pub grayscale_percent: i32,
    pub text_align: String,
    pub sort_order: i32,
    pub enabled: bool,
}

/// Editable fields of the showcase section.
#[derive(Debug, Clone)]
pub struct ShowcaseInput {
    pub heading: String,
    pub tagline: String,
    pub body: String,
    pub image_url: String,
    pub cta_label: String,
    pub cta_href: String,
    pub text_color: String,
    pub enabled: bool,
}

/// Editable fields of the brand story section.
#[derive(Debug, Clone)]
pub struct BrandStoryInput {
    pub heading: String,
    pub body: String,
    pub image_url: String,
    pub enabled: bool,
}

/// Editable branding settings.
#[derive(Debug, Clone)]
pub struct LogoInput {
    pub logo_url: String,
    pub alt_text: String,
    pub width_px: i32,
    pub show_wordmark: bool,
}

const HERO_COLUMNS: &str = "id, title, subtitle, image_url, cta_label, cta_href, text_color, \
     overlay_color, overlay_opacity, sort_order, enabled, updated_at";

const HIGHLIGHT_COLUMNS: &str =
    "id, title, body, icon, image_url, accent_color, sort_order, enabled, updated_at";

const TILE_COLUMNS: &str = "id, label, category, image_url, brightness_percent, \
     grayscale_percent, text_align, sort_order, enabled, updated_at";

/// Repository for admin home-page content operations.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Hero Slides
    // =========================================================================

    /// All hero slides in display order, disabled ones included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn hero_slides(&self) -> Result<Vec<HeroSlide>, RepositoryError> {
        let slides = sqlx::query_as::<_, HeroSlide>(&format!(
            "SELECT {HERO_COLUMNS} FROM hero_slide ORDER BY sort_order, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(slides)
    }

    /// Insert a hero slide.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_hero_slide(
        &self,
        input: HeroSlideInput,
    ) -> Result<HeroSlide, RepositoryError> {
        let slide = sqlx::query_as::<_, HeroSlide>(&format!(
            "INSERT INTO hero_slide (title, subtitle, image_url, cta_label, cta_href, \
                 text_color, overlay_color, overlay_opacity, sort_order, enabled) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {HERO_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.subtitle)
        .bind(&input.image_url)
        .bind(&input.cta_label)
        .bind(&input.cta_href)
        .bind(&input.text_color)
        .bind(&input.overlay_color)
        .bind(input.overlay_opacity)
        .bind(input.sort_order)
        .bind(input.enabled)
        .fetch_one(self.pool)
        .await?;

        Ok(slide)
    }

    /// Replace a hero slide's fields. Returns `None` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_hero_slide(
        &self,
        id: HeroSlideId,
        input: HeroSlideInput,
    ) -> Result<Option<HeroSlide>, RepositoryError> {
        let slide = sqlx::query_as::<_, HeroSlide>(&format!(
            "UPDATE hero_slide SET title = $2, subtitle = $3, image_url = $4, \
                 cta_label = $5, cta_href = $6, text_color = $7, overlay_color = $8, \
                 overlay_opacity = $9, sort_order = $10, enabled = $11, updated_at = now() \
             WHERE id = $1 \
             RETURNING {HERO_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.subtitle)
        .bind(&input.image_url)
        .bind(&input.cta_label)
        .bind(&input.cta_href)
        .bind(&input.text_color)
        .bind(&input.overlay_color)
        .bind(input.overlay_opacity)
        .bind(input.sort_order)
        .bind(input.enabled)
        .fetch_optional(self.pool)
        .await?;

        Ok(slide)
    }

    /// Delete a hero slide. Returns `false` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_hero_slide(&self, id: HeroSlideId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM hero_slide WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Highlights
    // =========================================================================

    /// All highlight cards in display order, disabled ones included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn highlights(&self) -> Result<Vec<Highlight>, RepositoryError> {
        let highlights = sqlx::query_as::<_, Highlight>(&format!(
            "SELECT {HIGHLIGHT_COLUMNS} FROM highlight ORDER BY sort_order, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(highlights)
    }

    /// Insert a highlight card.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_highlight(
        &self,
        input: HighlightInput,
    ) -> Result<Highlight, RepositoryError> {
        let highlight = sqlx::query_as::<_, Highlight>(&format!(
            "INSERT INTO highlight (title, body, icon, image_url, accent_color, \
                 sort_order, enabled) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {HIGHLIGHT_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.body)
        .bind(&input.icon)
        .bind(&input.image_url)
        .bind(&input.accent_color)
        .bind(input.sort_order)
        .bind(input.enabled)
        .fetch_one(self.pool)
        .await?;

        Ok(highlight)
    }

    /// Replace a highlight's fields. Returns `None` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_highlight(
        &self,
        id: HighlightId,
        input: HighlightInput,
    ) -> Result<Option<Highlight>, RepositoryError> {
        let highlight = sqlx::query_as::<_, Highlight>(&format!(
            "UPDATE highlight SET title = $2, body = $3, icon = $4, image_url = $5, \
                 accent_color = $6, sort_order = $7, enabled = $8, updated_at = now() \
             WHERE id = $1 \
             RETURNING {HIGHLIGHT_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.body)
        .bind(&input.icon)
        .bind(&input.image_url)
        .bind(&input.accent_color)
        .bind(input.sort_order)
        .bind(input.enabled)
        .fetch_optional(self.pool)
        .await?;

        Ok(highlight)
    }

    /// Delete a highlight. Returns `false` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_highlight(&self, id: HighlightId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM highlight WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Category Tiles
    // =========================================================================

    /// All category tiles in display order, disabled ones included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn category_tiles(&self) -> Result<Vec<CategoryTile>, RepositoryError> {
        let tiles = sqlx::query_as::<_, CategoryTile>(&format!(
            "SELECT {TILE_COLUMNS} FROM category_tile ORDER BY sort_order, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(tiles)
    }

    /// Insert a category tile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_category_tile(
        &self,
        input: CategoryTileInput,
    ) -> Result<CategoryTile, RepositoryError> {
        let tile = sqlx::query_as::<_, CategoryTile>(&format!(
            "INSERT INTO category_tile (label, category, image_url, brightness_percent, \
                 grayscale_percent, text_align, sort_order, enabled) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {TILE_COLUMNS}"
        ))
        .bind(&input.label)
        .bind(&input.category)
        .bind(&input.image_url)
        .bind(input.brightness_percent)
        .bind(input.grayscale_percent)
        .bind(&input.text_align)
        .bind(input.sort_order)
        .bind(input.enabled)
        .fetch_one(self.pool)
        .await?;

        Ok(tile)
    }

    /// Replace a category tile's fields. Returns `None` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_category_tile(
        &self,
        id: CategoryTileId,
        input: CategoryTileInput,
    ) -> Result<Option<CategoryTile>, RepositoryError> {
        let tile = sqlx::query_as::<_, CategoryTile>(&format!(
            "UPDATE category_tile SET label = $2, category = $3, image_url = $4, \
                 brightness_percent = $5, grayscale_percent = $6, text_align = $7, \
                 sort_order = $8, enabled = $9, updated_at = now() \
             WHERE id = $1 \
             RETURNING {TILE_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.label)
        .bind(&input.category)
        .bind(&input.image_url)
        .bind(input.brightness_percent)
        .bind(input.grayscale_percent)
        .bind(&input.text_align)
        .bind(input.sort_order)
        .bind(input.enabled)
        .fetch_optional(self.pool)
        .await?;

        Ok(tile)
    }

    /// Delete a category tile. Returns `false` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_category_tile(&self, id: CategoryTileId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM category_tile WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Singletons
    // =========================================================================

    /// The showcase section, if it has ever been saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn showcase(&self) -> Result<Option<ShowcaseSection>, RepositoryError> {
        let section = sqlx::query_as::<_, ShowcaseSection>(
            "SELECT heading, tagline, body, image_url, cta_label, cta_href, text_color, \
                 enabled, updated_at \
             FROM showcase_section WHERE id = 1",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(section)
    }

    /// Save the showcase section, creating the row on first save.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert_showcase(
        &self,
        input: ShowcaseInput,
    ) -> Result<ShowcaseSection, RepositoryError> {
        let section = sqlx::query_as::<_, ShowcaseSection>(
            "INSERT INTO showcase_section (id, heading, tagline, body, image_url, \
                 cta_label, cta_href, text_color, enabled) \
             VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET heading = $1, tagline = $2, body = $3, \
                 image_url = $4, cta_label = $5, cta_href = $6, text_color = $7, \
                 enabled = $8, updated_at = now() \
             RETURNING heading, tagline, body, image_url, cta_label, cta_href, \
                 text_color, enabled, updated_at",
        )
        .bind(&input.heading)
        .bind(&input.tagline)
        .bind(&input.body)
        .bind(&input.image_url)
        .bind(&input.cta_label)
        .bind(&input.cta_href)
        .bind(&input.text_color)
        .bind(input.enabled)
        .fetch_one(self.pool)
        .await?;

        Ok(section)
    }

    /// The brand story section, if it has ever been saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn brand_story(&self) -> Result<Option<BrandStory>, RepositoryError> {
        let story = sqlx::query_as::<_, BrandStory>(
            "SELECT heading, body, image_url, enabled, updated_at \
             FROM brand_story WHERE id = 1",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(story)
    }

    /// Save the brand story section, creating the row on first save.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert_brand_story(
        &self,
        input: BrandStoryInput,
    ) -> Result<BrandStory, RepositoryError> {
        let story = sqlx::query_as::<_, BrandStory>(
            "INSERT INTO brand_story (id, heading, body, image_url, enabled) \
             VALUES (1, $1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET heading = $1, body = $2, image_url = $3, \
                 enabled = $4, updated_at = now() \
             RETURNING heading, body, image_url, enabled, updated_at",
        )
        .bind(&input.heading)
        .bind(&input.body)
        .bind(&input.image_url)
        .bind(input.enabled)
        .fetch_one(self.pool)
        .await?;

        Ok(story)
    }

    /// The branding settings, if they have ever been saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn logo(&self) -> Result<Option<LogoSettings>, RepositoryError> {
        let logo = sqlx::query_as::<_, LogoSettings>(
            "SELECT logo_url, alt_text, width_px, show_wordmark, updated_at \
             FROM logo_settings WHERE id = 1",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(logo)
    }

    /// Save the branding settings, creating the row on first save.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert_logo(&self, input: LogoInput) -> Result<LogoSettings, RepositoryError> {
        let logo = sqlx::query_as::<_, LogoSettings>(
            "INSERT INTO logo_settings (id, logo_url, alt_text, width_px, show_wordmark) \
             VALUES (1, $1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET logo_url = $1, alt_text = $2, width_px = $3, \
                 show_wordmark = $4, updated_at = now() \
             RETURNING logo_url, alt_text, width_px, show_wordmark, updated_at",
        )
        .bind(&input.logo_url)
        .bind(&input.alt_text)
        .bind(input.width_px)
        .bind(input.show_wordmark)
        .fetch_one(self.pool)
        .await?;

        Ok(logo)
    }
}
