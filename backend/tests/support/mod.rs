//! Shared harness for the HTTP acceptance tests.
//!
//! Builds the full application over fresh in-memory stores and exposes the
//! stores for direct seeding and post-condition checks.

use actix_http::Request;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{test, web};

use gazette::domain::ports::UserDirectory;
use gazette::domain::{User, Username};
use gazette::inbound::http::health::HealthState;
use gazette::server;

/// Home-page size the tests run with.
pub const PAGE_SIZE: usize = 10;

/// Password every test account is registered with.
pub const PASSWORD: &str = "swordfish";

pub use gazette::server::MemoryBackends;

/// The application service type the harness hands back.
pub trait TestService:
    Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
}

impl<S> TestService for S where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
}

/// Build the full application over fresh in-memory stores.
pub async fn init_app() -> (impl TestService, MemoryBackends) {
    let (state, backends) = server::build_memory_state(PAGE_SIZE);
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    let app = test::init_service(server::build_app(
        web::Data::new(state),
        health,
        server::session_middleware(Key::generate(), false, SameSite::Lax),
    ))
    .await;
    (app, backends)
}

/// Register an account directly against the user directory.
pub async fn create_user(backends: &MemoryBackends, username: &str) -> User {
    let username = Username::new(username).expect("valid username");
    backends
        .users
        .register(&username, PASSWORD)
        .await
        .expect("register account")
}

/// Log `username` in through the real login route, returning the session
/// cookie to attach to subsequent requests.
pub async fn login(app: &impl TestService, username: &str) -> Cookie<'static> {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_form([("username", username), ("password", PASSWORD)])
            .to_request(),
    )
    .await;
    assert!(
        res.status().is_redirection(),
        "login should redirect, got {}",
        res.status()
    );
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Register and log in, returning the user and their session cookie.
pub async fn signed_in_user(
    app: &impl TestService,
    backends: &MemoryBackends,
    username: &str,
) -> (User, Cookie<'static>) {
    let user = create_user(backends, username).await;
    let cookie = login(app, username).await;
    (user, cookie)
}

/// GET `path`, optionally authenticated.
pub async fn get(
    app: &impl TestService,
    path: &str,
    cookie: Option<&Cookie<'static>>,
) -> ServiceResponse {
    let mut req = test::TestRequest::get().uri(path);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

/// The `Location` header of a redirect response.
pub fn location(res: &ServiceResponse) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("Location header")
}

/// Read the response body as UTF-8 text.
pub async fn body_text(res: ServiceResponse) -> String {
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
