//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend on
//! domain services and ports only and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserDirectory;
use crate::domain::{NewsService, NoteService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserDirectory>,
    pub news: NewsService,
    pub notes: NoteService,
}

impl HttpState {
    pub fn new(users: Arc<dyn UserDirectory>, news: NewsService, notes: NoteService) -> Self {
        Self { users, news, notes }
    }
}
