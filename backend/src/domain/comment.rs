//! Comments attached to news items.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::news::NewsId;
use crate::domain::user::UserId;

/// Stable comment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
    /// Generate a new random [`CommentId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CommentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A reader comment on a news item.
///
/// ## Invariants
/// - `author_id` is fixed at creation and never reassigned.
/// - `created_at` is assigned once and drives the strict ascending ordering
///   of a news item's comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    news_id: NewsId,
    author_id: UserId,
    text: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a comment with a fresh identifier.
    pub fn new(
        news_id: NewsId,
        author_id: UserId,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CommentId::random(),
            news_id,
            author_id,
            text: text.into(),
            created_at,
        }
    }

    pub fn id(&self) -> &CommentId {
        &self.id
    }

    pub fn news_id(&self) -> &NewsId {
        &self.news_id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the comment body. Authorship and timestamps are untouched.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
