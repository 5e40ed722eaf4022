//! Authentication pages: login, signup, logout.
//!
//! The credential check itself lives behind the [`UserDirectory`] port;
//! these handlers only bind it to the session cookie.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::ports::UserDirectoryError;
use crate::domain::{Error, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pages;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login form URL; guarded routes redirect here with a `next` parameter.
pub const LOGIN_PATH: &str = "/auth/login";
/// Signup form URL.
pub const SIGNUP_PATH: &str = "/auth/signup";
/// Logout URL.
pub const LOGOUT_PATH: &str = "/auth/logout";

const BAD_CREDENTIALS: &str = "Unknown username or wrong password";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

fn login_form_body(next: Option<&str>, error: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(message) = error {
        body.push_str(&pages::form_error(message));
    }
    body.push_str(&format!("<form method=\"post\" action=\"{LOGIN_PATH}\">\n"));
    if let Some(next) = next {
        body.push_str(&format!(
            "<input type=\"hidden\" name=\"next\" value=\"{}\">\n",
            pages::escape(next)
        ));
    }
    body.push_str(
        "<input name=\"username\">\n<input type=\"password\" name=\"password\">\n\
         <button type=\"submit\">Log in</button>\n</form>",
    );
    body
}

fn signup_form_body(username: &str, error: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(message) = error {
        body.push_str(&pages::form_error(message));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"{SIGNUP_PATH}\">\n\
         <input name=\"username\" value=\"{}\">\n\
         <input type=\"password\" name=\"password\">\n\
         <button type=\"submit\">Sign up</button>\n</form>",
        pages::escape(username)
    ));
    body
}

/// Only follow in-site redirect targets.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}

fn map_directory_error(error: UserDirectoryError) -> Error {
    Error::internal(format!("user directory error: {error}"))
}

#[get("/auth/login")]
pub async fn login_form(query: web::Query<NextQuery>) -> HttpResponse {
    pages::html("Log in", &login_form_body(query.next.as_deref(), None))
}

#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm {
        username,
        password,
        next,
    } = form.into_inner();

    let user = state
        .users
        .verify(&username, &password)
        .await
        .map_err(map_directory_error)?;

    match user {
        Some(user) => {
            session.persist_user(user.id())?;
            tracing::info!(user_id = %user.id(), "login");
            Ok(pages::redirect(safe_next(next.as_deref())))
        }
        None => Ok(pages::html(
            "Log in",
            &login_form_body(next.as_deref(), Some(BAD_CREDENTIALS)),
        )),
    }
}

#[get("/auth/signup")]
pub async fn signup_form() -> HttpResponse {
    pages::html("Sign up", &signup_form_body("", None))
}

#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    form: web::Form<SignupForm>,
) -> ApiResult<HttpResponse> {
    let SignupForm { username, password } = form.into_inner();

    let valid = match Username::new(username.as_str()) {
        Ok(valid) => valid,
        Err(error) => {
            return Ok(pages::html(
                "Sign up",
                &signup_form_body(&username, Some(&error.to_string())),
            ));
        }
    };
    if password.trim().is_empty() {
        return Ok(pages::html(
            "Sign up",
            &signup_form_body(&username, Some("password must not be empty")),
        ));
    }

    match state.users.register(&valid, &password).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id(), "account created");
            Ok(pages::redirect(LOGIN_PATH))
        }
        Err(UserDirectoryError::DuplicateUsername(name)) => Ok(pages::html(
            "Sign up",
            &signup_form_body(&username, Some(&format!("username {name} is already taken"))),
        )),
        Err(other) => Err(map_directory_error(other)),
    }
}

#[get("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    pages::html("Logged out", "<p>You have been logged out.</p>")
}
