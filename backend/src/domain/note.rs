//! Personal notes addressed by slug.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::slug::Slug;
use crate::domain::user::UserId;

/// Appended to the colliding slug in the duplicate-slug form error.
pub const SLUG_IN_USE_SUFFIX: &str = " is already in use, pick a unique value";

/// Stable note identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Generate a new random [`NoteId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A personal note.
///
/// ## Invariants
/// - `author_id` is fixed at creation and never reassigned.
/// - `slug` is unique across all notes; the store rejects collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    title: String,
    text: String,
    slug: Slug,
    author_id: UserId,
}

impl Note {
    /// Build a note with a fresh identifier.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        slug: Slug,
        author_id: UserId,
    ) -> Self {
        Self {
            id: NoteId::random(),
            title: title.into(),
            text: text.into(),
            slug,
            author_id,
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Apply an edit. Identity and authorship are untouched.
    pub fn apply(&mut self, title: impl Into<String>, text: impl Into<String>, slug: Slug) {
        self.title = title.into();
        self.text = text.into();
        self.slug = slug;
    }
}
