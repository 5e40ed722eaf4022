//! Port for note persistence adapters.
//!
//! Slug uniqueness is the store's contract: the collision check and the
//! write happen inside one critical section, so two concurrent submissions
//! of the same slug cannot both be persisted.

use async_trait::async_trait;

use crate::domain::note::{Note, NoteId};
use crate::domain::slug::Slug;
use crate::domain::user::UserId;

/// Errors raised by note store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteStoreError {
    /// The underlying store could not be reached or mutated.
    #[error("note store failure: {0}")]
    Storage(String),
    /// Another note already holds this slug.
    #[error("slug {0} is already in use")]
    DuplicateSlug(Slug),
    /// The note being updated no longer exists.
    #[error("note {0} is missing")]
    Missing(NoteId),
}

/// Port for note storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note, rejecting a slug already held by any note.
    async fn insert(&self, note: &Note) -> Result<(), NoteStoreError>;

    /// Replace a note, rejecting a slug held by any *other* note.
    async fn update(&self, note: &Note) -> Result<(), NoteStoreError>;

    /// Remove a note. Removing an absent note is a no-op.
    async fn delete(&self, id: &NoteId) -> Result<(), NoteStoreError>;

    /// Fetch a note by slug.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NoteStoreError>;

    /// Every note owned by `author`, in unspecified order.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteStoreError>;
}
