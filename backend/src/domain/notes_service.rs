//! Notes domain service.

use std::sync::Arc;

use crate::domain::error::Error;
use crate::domain::note::{Note, SLUG_IN_USE_SUFFIX};
use crate::domain::policy::{Actor, Operation, decide, ensure_allowed};
use crate::domain::ports::{NoteRepository, NoteStoreError};
use crate::domain::slug::{Slug, slugify};

/// A submitted note form, before slug resolution.
#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    /// Explicit slug; blank or missing means "derive from the title".
    pub slug: Option<String>,
}

/// Use-cases for the notes site: per-actor listing and slug-addressed
/// create/detail/edit/delete under the access-control policy.
#[derive(Clone)]
pub struct NoteService {
    notes: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// Every note owned by the actor. Other actors' notes are silently
    /// absent rather than an error.
    pub async fn list(&self, actor: &Actor) -> Result<Vec<Note>, Error> {
        ensure_allowed(decide(actor, Operation::Submit))?;
        let Some(author) = actor.user_id() else {
            return Err(Error::unauthorized("login required"));
        };
        self.notes
            .list_by_author(author)
            .await
            .map_err(map_note_error)
    }

    /// Create a note, deriving the slug from the title when none is given.
    pub async fn create(&self, actor: &Actor, draft: NoteDraft) -> Result<Note, Error> {
        ensure_allowed(decide(actor, Operation::Submit))?;
        let Some(author) = actor.user_id() else {
            return Err(Error::unauthorized("login required"));
        };

        let slug = resolve_slug(&draft)?;
        let note = Note::new(draft.title, draft.text, slug, *author);
        self.notes
            .insert(&note)
            .await
            .map_err(map_note_write_error)?;
        tracing::info!(note_id = %note.id(), slug = %note.slug(), "note created");
        Ok(note)
    }

    /// Load a note on behalf of `actor`, applying the ownership policy.
    ///
    /// A non-owner learns nothing: the note is reported absent.
    pub async fn note_for(&self, actor: &Actor, slug: &Slug) -> Result<Note, Error> {
        let note = self
            .notes
            .find_by_slug(slug)
            .await
            .map_err(map_note_error)?
            .ok_or_else(|| Error::not_found("no such note"))?;
        ensure_allowed(decide(
            actor,
            Operation::Owned {
                author: note.author_id(),
            },
        ))?;
        Ok(note)
    }

    /// Edit the actor's own note. Changing the slug re-checks uniqueness;
    /// keeping it is always allowed.
    pub async fn edit(&self, actor: &Actor, slug: &Slug, draft: NoteDraft) -> Result<Note, Error> {
        let mut note = self.note_for(actor, slug).await?;
        let new_slug = resolve_slug(&draft)?;
        note.apply(draft.title, draft.text, new_slug);
        self.notes
            .update(&note)
            .await
            .map_err(map_note_write_error)?;
        Ok(note)
    }

    /// Delete the actor's own note.
    pub async fn delete(&self, actor: &Actor, slug: &Slug) -> Result<(), Error> {
        let note = self.note_for(actor, slug).await?;
        self.notes.delete(note.id()).await.map_err(map_note_error)?;
        tracing::info!(note_id = %note.id(), slug = %slug, "note deleted");
        Ok(())
    }
}

fn resolve_slug(draft: &NoteDraft) -> Result<Slug, Error> {
    match draft.slug.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            Slug::new(raw).map_err(|error| Error::validation("slug", error.to_string()))
        }
        _ => slugify(&draft.title)
            .map_err(|_| Error::validation("slug", "a slug could not be derived from this title")),
    }
}

fn map_note_error(error: NoteStoreError) -> Error {
    match error {
        NoteStoreError::Missing(_) => Error::not_found("no such note"),
        other => Error::internal(format!("note store error: {other}")),
    }
}

fn map_note_write_error(error: NoteStoreError) -> Error {
    match error {
        NoteStoreError::DuplicateSlug(slug) => {
            Error::validation("slug", format!("{slug}{SLUG_IN_USE_SUFFIX}"))
        }
        other => map_note_error(other),
    }
}
