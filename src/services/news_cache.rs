use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::NewsPage;
use crate::utils::Clock;

/// Where the cache refills from. Implemented by the engine client; tests
/// substitute a counting fake.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_news(&self) -> Result<Vec<Value>, AppError>;
}

#[derive(Debug)]
pub struct FeedSnapshot {
    pub articles: Vec<Value>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewsCacheConfig {
    pub ttl_secs: i64,
}

impl NewsCacheConfig {
    pub fn from_env() -> Self {
        Self {
            ttl_secs: std::env::var("NEWS_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .unwrap_or(1200),
        }
    }
}

/// Single-process TTL cache over the upstream news feed. The snapshot is
/// replaced wholesale under the lock; the lock is never held across an
/// await, so a refresh in flight can never expose a half-written snapshot.
#[derive(Clone)]
pub struct NewsCache {
    snapshot: Arc<RwLock<Option<Arc<FeedSnapshot>>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl NewsCache {
    pub fn new(config: NewsCacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(None)),
            ttl: Duration::seconds(config.ttl_secs),
            clock,
        }
    }

    fn is_fresh(&self, snapshot: &FeedSnapshot) -> bool {
        self.clock.now() - snapshot.fetched_at <= self.ttl
    }

    /// Serve one page, refreshing from `source` when the snapshot is
    /// missing or past its TTL. A failed refresh falls back to the stale
    /// snapshot when one exists; with an empty cache the failure surfaces
    /// as a 500.
    pub async fn page(
        &self,
        source: &dyn NewsSource,
        page: u32,
        limit: u32,
    ) -> Result<NewsPage, AppError> {
        let page = page.max(1);
        let limit = limit.max(1);

        let current = self.snapshot.read().clone();
        let needs_refresh = current
            .as_deref()
            .map(|snap| !self.is_fresh(snap))
            .unwrap_or(true);

        let snapshot = if needs_refresh {
            match source.fetch_news().await {
                Ok(articles) => {
                    info!("Refreshed news cache with {} articles", articles.len());
                    let fresh = Arc::new(FeedSnapshot {
                        articles,
                        fetched_at: self.clock.now(),
                    });
                    *self.snapshot.write() = Some(fresh.clone());
                    fresh
                }
                Err(e) => match current {
                    Some(stale) => {
                        warn!("News refresh failed, serving stale snapshot: {}", e);
                        stale
                    }
                    None => {
                        warn!("News refresh failed with empty cache: {}", e);
                        return Err(AppError::Internal("Internal Server Error".to_string()));
                    }
                },
            }
        } else {
            // needs_refresh is false only when a snapshot exists
            current.unwrap()
        };

        let total = snapshot.articles.len();
        let start = (page as usize - 1) * limit as usize;
        let results: Vec<Value> = snapshot
            .articles
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(NewsPage {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit as usize),
            results,
            last_updated: snapshot.fetched_at,
            cached: self.is_fresh(&snapshot),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_clock::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeFeed {
        articles: Vec<Value>,
        fail: std::sync::atomic::AtomicBool,
        calls: AtomicUsize,
    }

    impl FakeFeed {
        fn with_articles(count: usize) -> Self {
            Self {
                articles: (0..count)
                    .map(|i| serde_json::json!({ "title": format!("article {i}") }))
                    .collect(),
                fail: std::sync::atomic::AtomicBool::new(false),
                calls: AtomicUsize::new(0),
            }
        }

        fn set_failing(&self, failing: bool) {
            self.fail.store(failing, Ordering::SeqCst);
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NewsSource for FakeFeed {
        async fn fetch_news(&self) -> Result<Vec<Value>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(AppError::Upstream {
                    status: 502,
                    message: "feed down".to_string(),
                    details: None,
                })
            } else {
                Ok(self.articles.clone())
            }
        }
    }

    fn cache_with_clock(ttl_secs: i64) -> (NewsCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = NewsCache::new(NewsCacheConfig { ttl_secs }, clock.clone());
        (cache, clock)
    }

    #[tokio::test]
    async fn second_read_within_ttl_hits_the_cache() {
        let (cache, _clock) = cache_with_clock(1200);
        let feed = FakeFeed::with_articles(3);

        cache.page(&feed, 1, 25).await.unwrap();
        let second = cache.page(&feed, 1, 25).await.unwrap();

        assert_eq!(feed.call_count(), 1);
        assert!(second.cached);
    }

    #[tokio::test]
    async fn expired_snapshot_triggers_exactly_one_refresh() {
        let (cache, clock) = cache_with_clock(1200);
        let feed = FakeFeed::with_articles(3);

        cache.page(&feed, 1, 25).await.unwrap();
        clock.advance(Duration::seconds(1201));
        cache.page(&feed, 1, 25).await.unwrap();

        assert_eq!(feed.call_count(), 2);
    }

    #[tokio::test]
    async fn stale_snapshot_is_served_when_refresh_fails() {
        let (cache, clock) = cache_with_clock(1200);
        let feed = FakeFeed::with_articles(3);

        cache.page(&feed, 1, 25).await.unwrap();
        clock.advance(Duration::seconds(1800));
        feed.set_failing(true);

        let page = cache.page(&feed, 1, 25).await.unwrap();
        assert_eq!(page.total, 3);
        assert!(!page.cached);
    }

    #[tokio::test]
    async fn empty_cache_plus_failed_fetch_is_an_error() {
        let (cache, _clock) = cache_with_clock(1200);
        let feed = FakeFeed::with_articles(3);
        feed.set_failing(true);

        let result = cache.page(&feed, 1, 25).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn pagination_slices_and_counts_correctly() {
        let (cache, _clock) = cache_with_clock(1200);
        let feed = FakeFeed::with_articles(60);

        let page = cache.page(&feed, 3, 25).await.unwrap();
        assert_eq!(page.results.len(), 10);
        assert_eq!(page.total, 60);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.results[0]["title"], "article 50");

        let beyond = cache.page(&feed, 5, 25).await.unwrap();
        assert!(beyond.results.is_empty());
        assert_eq!(beyond.total, 60);
    }

    #[tokio::test]
    async fn page_and_limit_floor_at_one() {
        let (cache, _clock) = cache_with_clock(1200);
        let feed = FakeFeed::with_articles(5);

        let page = cache.page(&feed, 0, 0).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 1);
        assert_eq!(page.results.len(), 1);
    }
}
