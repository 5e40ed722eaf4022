//! News items published on the home page.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable news identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsId(Uuid);

impl NewsId {
    /// Generate a new random [`NewsId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for NewsId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A news item.
///
/// News is created administratively and never mutated through the public
/// route surface. `date` drives the descending home-page ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct News {
    id: NewsId,
    title: String,
    text: String,
    date: NaiveDate,
}

impl News {
    /// Build a news item with a fresh identifier.
    pub fn new(title: impl Into<String>, text: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: NewsId::random(),
            title: title.into(),
            text: text.into(),
            date,
        }
    }

    pub fn id(&self) -> &NewsId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}
