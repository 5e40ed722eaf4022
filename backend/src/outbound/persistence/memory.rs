//! In-memory adapters for the domain ports.
//!
//! Each adapter guards its records with a single [`Mutex`]; every
//! check-then-write sequence (slug and username uniqueness) runs inside one
//! critical section, so concurrent identical writes cannot both succeed.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::comment::{Comment, CommentId};
use crate::domain::news::{News, NewsId};
use crate::domain::note::{Note, NoteId};
use crate::domain::ports::{
    CommentRepository, CommentStoreError, NewsRepository, NewsStoreError, NoteRepository,
    NoteStoreError, UserDirectory, UserDirectoryError,
};
use crate::domain::slug::Slug;
use crate::domain::user::{User, UserId, Username};

fn guard<'a, T, E>(
    rows: &'a Mutex<T>,
    poisoned: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    rows.lock()
        .map_err(|_| poisoned("store lock poisoned".to_owned()))
}

/// News held in process memory.
#[derive(Debug, Default)]
pub struct MemoryNewsRepository {
    rows: Mutex<Vec<News>>,
}

#[async_trait]
impl NewsRepository for MemoryNewsRepository {
    async fn insert(&self, news: &News) -> Result<(), NewsStoreError> {
        let mut rows = guard(&self.rows, NewsStoreError::Storage)?;
        rows.push(news.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &NewsId) -> Result<Option<News>, NewsStoreError> {
        let rows = guard(&self.rows, NewsStoreError::Storage)?;
        Ok(rows.iter().find(|news| news.id() == id).cloned())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<News>, NewsStoreError> {
        let rows = guard(&self.rows, NewsStoreError::Storage)?;
        let mut listed: Vec<News> = rows.clone();
        listed.sort_by(|a, b| b.date().cmp(&a.date()));
        listed.truncate(limit);
        Ok(listed)
    }
}

/// Comments held in process memory.
#[derive(Debug, Default)]
pub struct MemoryCommentRepository {
    rows: Mutex<HashMap<CommentId, Comment>>,
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn upsert(&self, comment: &Comment) -> Result<(), CommentStoreError> {
        let mut rows = guard(&self.rows, CommentStoreError::Storage)?;
        rows.insert(*comment.id(), comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentStoreError> {
        let rows = guard(&self.rows, CommentStoreError::Storage)?;
        Ok(rows.get(id).cloned())
    }

    async fn delete(&self, id: &CommentId) -> Result<(), CommentStoreError> {
        let mut rows = guard(&self.rows, CommentStoreError::Storage)?;
        rows.remove(id);
        Ok(())
    }

    async fn list_for_news(&self, news_id: &NewsId) -> Result<Vec<Comment>, CommentStoreError> {
        let rows = guard(&self.rows, CommentStoreError::Storage)?;
        let mut listed: Vec<Comment> = rows
            .values()
            .filter(|comment| comment.news_id() == news_id)
            .cloned()
            .collect();
        listed.sort_by_key(Comment::created_at);
        Ok(listed)
    }
}

/// Notes held in process memory.
#[derive(Debug, Default)]
pub struct MemoryNoteRepository {
    rows: Mutex<HashMap<NoteId, Note>>,
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn insert(&self, note: &Note) -> Result<(), NoteStoreError> {
        let mut rows = guard(&self.rows, NoteStoreError::Storage)?;
        if rows.values().any(|existing| existing.slug() == note.slug()) {
            return Err(NoteStoreError::DuplicateSlug(note.slug().clone()));
        }
        rows.insert(*note.id(), note.clone());
        Ok(())
    }

    async fn update(&self, note: &Note) -> Result<(), NoteStoreError> {
        let mut rows = guard(&self.rows, NoteStoreError::Storage)?;
        if !rows.contains_key(note.id()) {
            return Err(NoteStoreError::Missing(*note.id()));
        }
        let collision = rows
            .values()
            .any(|existing| existing.id() != note.id() && existing.slug() == note.slug());
        if collision {
            return Err(NoteStoreError::DuplicateSlug(note.slug().clone()));
        }
        rows.insert(*note.id(), note.clone());
        Ok(())
    }

    async fn delete(&self, id: &NoteId) -> Result<(), NoteStoreError> {
        let mut rows = guard(&self.rows, NoteStoreError::Storage)?;
        rows.remove(id);
        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NoteStoreError> {
        let rows = guard(&self.rows, NoteStoreError::Storage)?;
        Ok(rows.values().find(|note| note.slug() == slug).cloned())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteStoreError> {
        let rows = guard(&self.rows, NoteStoreError::Storage)?;
        Ok(rows
            .values()
            .filter(|note| note.author_id() == author)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone)]
struct DirectoryEntry {
    user: User,
    digest: String,
}

/// Accounts held in process memory. Passwords are stored as salted
/// SHA-256 digests; good enough for an in-process directory, not a vault.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    rows: Mutex<HashMap<UserId, DirectoryEntry>>,
}

fn password_digest(username: &Username, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_ref().as_bytes());
    hasher.update([0]);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn register(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<User, UserDirectoryError> {
        let mut rows = guard(&self.rows, UserDirectoryError::Storage)?;
        if rows
            .values()
            .any(|entry| entry.user.username() == username)
        {
            return Err(UserDirectoryError::DuplicateUsername(username.clone()));
        }
        let user = User::new(UserId::random(), username.clone());
        rows.insert(
            *user.id(),
            DirectoryEntry {
                user: user.clone(),
                digest: password_digest(username, password),
            },
        );
        Ok(user)
    }

    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, UserDirectoryError> {
        let rows = guard(&self.rows, UserDirectoryError::Storage)?;
        let matched = rows.values().find(|entry| {
            entry.user.username().as_ref() == username
                && entry.digest == password_digest(entry.user.username(), password)
        });
        Ok(matched.map(|entry| entry.user.clone()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        let rows = guard(&self.rows, UserDirectoryError::Storage)?;
        Ok(rows.get(id).map(|entry| entry.user.clone()))
    }
}
