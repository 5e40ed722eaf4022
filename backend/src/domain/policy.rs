//! Access-control policy.
//!
//! A pure decision function over (actor, operation). The HTTP layer turns
//! [`Decision::RedirectToLogin`] into a `302` to the login form with a
//! `next` parameter and [`Decision::NotFound`] into a `404`; a non-owner is
//! never told the resource exists.

use crate::domain::error::Error;
use crate::domain::user::UserId;

/// The identity attached to an incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    User(UserId),
}

impl Actor {
    /// The authenticated user id, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(id),
        }
    }
}

/// What the request is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    /// Views open to everyone: home listing, news detail, auth pages, the
    /// notes landing page.
    ViewPublic,
    /// Writes and owner-scoped listings that require a signed-in actor but
    /// touch no one else's content: create comment/note, list own notes,
    /// the success page.
    Submit,
    /// Detail/edit/delete of a resource owned by `author`.
    Owned { author: &'a UserId },
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectToLogin,
    NotFound,
}

/// Decide whether `actor` may perform `operation`.
pub fn decide(actor: &Actor, operation: Operation<'_>) -> Decision {
    match operation {
        Operation::ViewPublic => Decision::Allow,
        Operation::Submit => match actor {
            Actor::Anonymous => Decision::RedirectToLogin,
            Actor::User(_) => Decision::Allow,
        },
        Operation::Owned { author } => match actor {
            Actor::Anonymous => Decision::RedirectToLogin,
            Actor::User(id) if id == author => Decision::Allow,
            Actor::User(_) => Decision::NotFound,
        },
    }
}

/// Map a denial onto the domain error the services propagate.
///
/// `RedirectToLogin` only surfaces here on requests that bypassed the HTTP
/// login guard; it degrades to a plain unauthorized error.
pub fn ensure_allowed(decision: Decision) -> Result<(), Error> {
    match decision {
        Decision::Allow => Ok(()),
        Decision::RedirectToLogin => Err(Error::unauthorized("login required")),
        Decision::NotFound => Err(Error::not_found("no such resource")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use rstest::rstest;

    fn anonymous() -> Actor {
        Actor::Anonymous
    }

    fn user(id: UserId) -> Actor {
        Actor::User(id)
    }

    #[rstest]
    fn public_views_are_open_to_everyone() {
        let owner = UserId::random();
        for actor in [anonymous(), user(UserId::random()), user(owner)] {
            assert_eq!(decide(&actor, Operation::ViewPublic), Decision::Allow);
        }
    }

    #[rstest]
    fn submit_requires_a_signed_in_actor() {
        assert_eq!(
            decide(&anonymous(), Operation::Submit),
            Decision::RedirectToLogin
        );
        assert_eq!(
            decide(&user(UserId::random()), Operation::Submit),
            Decision::Allow
        );
    }

    #[rstest]
    fn owned_operations_allow_only_the_author() {
        let author = UserId::random();
        let operation = Operation::Owned { author: &author };

        assert_eq!(decide(&anonymous(), operation), Decision::RedirectToLogin);
        assert_eq!(
            decide(&user(UserId::random()), operation),
            Decision::NotFound
        );
        assert_eq!(decide(&user(author), operation), Decision::Allow);
    }

    #[rstest]
    #[case(Decision::RedirectToLogin, ErrorCode::Unauthorized)]
    #[case(Decision::NotFound, ErrorCode::NotFound)]
    fn denials_map_to_domain_errors(#[case] decision: Decision, #[case] expected: ErrorCode) {
        let error = ensure_allowed(decision).expect_err("denied");
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn allow_maps_to_ok() {
        assert!(ensure_allowed(Decision::Allow).is_ok());
    }
}
