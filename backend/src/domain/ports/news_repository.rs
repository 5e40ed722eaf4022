//! Port for news persistence adapters.

use async_trait::async_trait;

use crate::domain::news::{News, NewsId};

/// Errors raised by news store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NewsStoreError {
    /// The underlying store could not be reached or mutated.
    #[error("news store failure: {0}")]
    Storage(String),
}

/// Port for news storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Insert a news item. News is created administratively only.
    async fn insert(&self, news: &News) -> Result<(), NewsStoreError>;

    /// Fetch a news item by identifier.
    async fn find_by_id(&self, id: &NewsId) -> Result<Option<News>, NewsStoreError>;

    /// The most recent news, sorted by `date` descending and truncated to
    /// `limit` items.
    async fn list_recent(&self, limit: usize) -> Result<Vec<News>, NewsStoreError>;
}
