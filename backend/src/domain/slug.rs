//! Slug validation and derivation for notes.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, hyphens, and underscores. When a note is submitted
//! without one, the slug is derived deterministically from the title via
//! ASCII transliteration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length of a slug in bytes.
pub const SLUG_MAX_LEN: usize = 100;

/// Validation errors returned by [`Slug::new`] and [`slugify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugValidationError {
    Empty,
    TooLong { max: usize },
    InvalidCharacters,
}

impl fmt::Display for SlugValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "slug must not be empty"),
            Self::TooLong { max } => write!(f, "slug must be at most {max} characters"),
            Self::InvalidCharacters => write!(
                f,
                "slug may only contain lowercase letters, digits, hyphens, or underscores",
            ),
        }
    }
}

impl std::error::Error for SlugValidationError {}

/// Unique URL-safe identifier for a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and construct a [`Slug`] from owned input.
    pub fn new(slug: impl Into<String>) -> Result<Self, SlugValidationError> {
        Self::from_owned(slug.into())
    }

    fn from_owned(slug: String) -> Result<Self, SlugValidationError> {
        if slug.is_empty() || slug.trim() != slug {
            return Err(SlugValidationError::Empty);
        }
        if slug.len() > SLUG_MAX_LEN {
            return Err(SlugValidationError::TooLong { max: SLUG_MAX_LEN });
        }
        if !slug
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_')
        {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Derive a slug from free-form text.
///
/// Transliterates to ASCII, lowercases, collapses every run of
/// non-alphanumeric characters to a single hyphen, and truncates to
/// [`SLUG_MAX_LEN`]. Fails only when nothing sluggable remains.
pub fn slugify(text: &str) -> Result<Slug, SlugValidationError> {
    let ascii = deunicode::deunicode(text).to_lowercase();

    let mut out = String::with_capacity(ascii.len());
    let mut pending_separator = false;
    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(ch);
        } else {
            pending_separator = true;
        }
        if out.len() >= SLUG_MAX_LEN {
            break;
        }
    }
    out.truncate(SLUG_MAX_LEN);
    let out = out.trim_end_matches('-').to_owned();

    Slug::new(out)
}
