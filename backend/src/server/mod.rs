//! Server construction and middleware wiring.

mod config;

pub use config::{DEFAULT_PAGE_SIZE, ServerConfig};

use std::sync::Arc;

use actix_session::{SessionMiddleware, config::CookieContentSecurity, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::domain::{NewsService, NoteService};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, news, notes};
use crate::middleware::Trace;
use crate::outbound::persistence::{
    MemoryCommentRepository, MemoryNewsRepository, MemoryNoteRepository, MemoryUserDirectory,
};

/// The in-memory adapters behind a running server, kept accessible so
/// startup seeding and tests can reach the stores directly.
#[derive(Clone)]
pub struct MemoryBackends {
    pub news: Arc<MemoryNewsRepository>,
    pub comments: Arc<MemoryCommentRepository>,
    pub notes: Arc<MemoryNoteRepository>,
    pub users: Arc<MemoryUserDirectory>,
}

impl Default for MemoryBackends {
    fn default() -> Self {
        Self {
            news: Arc::new(MemoryNewsRepository::default()),
            comments: Arc::new(MemoryCommentRepository::default()),
            notes: Arc::new(MemoryNoteRepository::default()),
            users: Arc::new(MemoryUserDirectory::default()),
        }
    }
}

/// Wire the domain services over fresh in-memory adapters.
pub fn build_memory_state(page_size: usize) -> (HttpState, MemoryBackends) {
    let backends = MemoryBackends::default();
    let state = HttpState::new(
        backends.users.clone(),
        NewsService::new(backends.news.clone(), backends.comments.clone(), page_size),
        NoteService::new(backends.notes.clone()),
    );
    (state, backends)
}

/// Build the cookie-session middleware shared by server and tests.
pub fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .build()
}

/// Assemble the application with every route registered.
pub fn build_app(
    state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
    session: SessionMiddleware<CookieSessionStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(health_state)
        .wrap(session)
        .wrap(Trace)
        .service(news::home)
        .service(news::news_detail)
        .service(news::create_comment)
        .service(news::edit_comment_form)
        .service(news::edit_comment)
        .service(news::delete_comment_form)
        .service(news::delete_comment_submit)
        .service(news::delete_comment_direct)
        .service(notes::notes_home)
        .service(notes::list_notes)
        .service(notes::add_note_form)
        .service(notes::add_note)
        .service(notes::note_success)
        .service(notes::note_detail)
        .service(notes::edit_note_form)
        .service(notes::edit_note)
        .service(notes::delete_note_form)
        .service(notes::delete_note_submit)
        .service(notes::delete_note_direct)
        .service(auth::login_form)
        .service(auth::login)
        .service(auth::signup_form)
        .service(auth::signup)
        .service(auth::logout)
        .service(ready)
        .service(live)
}

/// Run the HTTP server until shutdown.
pub async fn run(config: ServerConfig, state: HttpState) -> std::io::Result<()> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        page_size: _,
    } = config;

    let health_state = web::Data::new(HealthState::new());
    let data = web::Data::new(state);
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(
            data.clone(),
            server_health.clone(),
            session_middleware(key.clone(), cookie_secure, same_site),
        )
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
