//! Port for comment persistence adapters.

use async_trait::async_trait;

use crate::domain::comment::{Comment, CommentId};
use crate::domain::news::NewsId;

/// Errors raised by comment store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentStoreError {
    /// The underlying store could not be reached or mutated.
    #[error("comment store failure: {0}")]
    Storage(String),
}

/// Port for comment storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert or replace a comment record.
    async fn upsert(&self, comment: &Comment) -> Result<(), CommentStoreError>;

    /// Fetch a comment by identifier.
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentStoreError>;

    /// Remove a comment. Removing an absent comment is a no-op.
    async fn delete(&self, id: &CommentId) -> Result<(), CommentStoreError>;

    /// Every comment of a news item, sorted by `created_at` ascending.
    async fn list_for_news(&self, news_id: &NewsId) -> Result<Vec<Comment>, CommentStoreError>;
}
