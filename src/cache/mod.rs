use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::models::portfolio;

const CATALOG_KEY: &str = "portfolio:list";

/// In-process cache for the portfolio listing.
///
/// The database stays the single source of truth: reads populate the
/// entry, and every catalog mutation invalidates it. The TTL is a
/// backstop in case an invalidation is ever missed.
#[derive(Clone)]
pub struct CatalogCache {
    inner: Cache<&'static str, Arc<Vec<portfolio::Model>>>,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder().max_capacity(4).time_to_live(ttl).build(),
        }
    }

    /// TTL from `CACHE_TTL_PORTFOLIO` (seconds), default 5 minutes.
    pub fn from_env() -> Self {
        Self::new(parse_duration_secs("CACHE_TTL_PORTFOLIO", 300))
    }

    pub async fn get(&self) -> Option<Arc<Vec<portfolio::Model>>> {
        self.inner.get(CATALOG_KEY).await
    }

    pub async fn set(&self, items: Vec<portfolio::Model>) {
        self.inner.insert(CATALOG_KEY, Arc::new(items)).await;
    }

    pub async fn invalidate(&self) {
        self.inner.invalidate(CATALOG_KEY).await;
    }
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}
