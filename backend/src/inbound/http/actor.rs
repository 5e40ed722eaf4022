//! Request actor extractors.
//!
//! `CurrentUser` identifies the actor on pages open to everyone;
//! `RequireUser` guards authenticated-only routes and surfaces the policy's
//! redirect-to-login decision, carrying the original path in `next`.

use std::fmt;

use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload};
use actix_web::http::{StatusCode, header};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Actor, UserId};
use crate::inbound::http::auth::LOGIN_PATH;
use crate::inbound::http::session::SessionContext;

/// The optional signed-in user on a public page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<UserId>);

impl CurrentUser {
    /// The policy actor for this request.
    pub fn actor(&self) -> Actor {
        match self.0 {
            Some(id) => Actor::User(id),
            None => Actor::Anonymous,
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let session = fut.await?;
            let user_id = session.user_id()?;
            Ok(CurrentUser(user_id))
        })
    }
}

/// The signed-in user on an authenticated-only route.
#[derive(Debug, Clone)]
pub struct RequireUser(pub UserId);

impl RequireUser {
    /// The policy actor for this request.
    pub fn actor(&self) -> Actor {
        Actor::User(self.0)
    }
}

impl FromRequest for RequireUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let next = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
        let fut = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let session = fut.await?;
            match session.user_id()? {
                Some(id) => Ok(RequireUser(id)),
                None => Err(LoginRedirect { next }.into()),
            }
        })
    }
}

/// Anonymous actor on a guarded route: redirect to the login form, keeping
/// the original path so login can return the user to it.
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    next: String,
}

impl LoginRedirect {
    pub fn new(next: impl Into<String>) -> Self {
        Self { next: next.into() }
    }

    /// The login URL annotated with the original request path.
    pub fn location(&self) -> String {
        format!("{LOGIN_PATH}?next={}", self.next)
    }
}

impl fmt::Display for LoginRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "login required, redirecting to {}", self.location())
    }
}

impl ResponseError for LoginRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, self.location()))
            .finish()
    }
}
