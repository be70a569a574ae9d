//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::db::ContentRepository;
use crate::error::Result as AppResult;
use crate::gateway::{GatewayClient, GatewayError};
use crate::models::content::HomeContent;

/// TTL for the cached home-content payload.
const HOME_CONTENT_TTL: Duration = Duration::from_secs(60);

/// Cache key for the single home-content entry.
const HOME_CONTENT_KEY: &str = "home";

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    gateway: GatewayClient,
    home_content: Cache<&'static str, Arc<HomeContent>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway HTTP client cannot be constructed.
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Result<Self, GatewayError> {
        let gateway = GatewayClient::new(&config.gateway)?;
        let home_content = Cache::builder()
            .max_capacity(1)
            .time_to_live(HOME_CONTENT_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                gateway,
                home_content,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the payment gateway client.
    #[must_use]
    pub fn gateway(&self) -> &GatewayClient {
        &self.inner.gateway
    }

    /// Home-page content, served from cache when fresh.
    ///
    /// The home payload is read on every page load, so it is cached for
    /// [`HOME_CONTENT_TTL`]; admin edits show up when the entry expires.
    ///
    /// # Errors
    ///
    /// Returns the underlying repository error on a cold-cache miss.
    pub async fn home_content(&self) -> AppResult<Arc<HomeContent>> {
        if let Some(content) = self.inner.home_content.get(HOME_CONTENT_KEY).await {
            return Ok(content);
        }

        let content = Arc::new(ContentRepository::new(self.pool()).home().await?);
        self.inner
            .home_content
            .insert(HOME_CONTENT_KEY, Arc::clone(&content))
            .await;

        Ok(content)
    }
}
