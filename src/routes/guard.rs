//! Route guard — the access-control wrapper around protected page routes.
//!
//! DESIGN
//! ======
//! The guard separates deciding from responding: [`decide`] is a pure
//! function over the resolved identity and the required role, unit-testable
//! without HTTP. The middleware rebuilds the caller identity per request,
//! runs the decision, and either injects the identity into request
//! extensions or redirects.
//!
//! Both denial cases redirect to the single `/login` path with a notice,
//! never to a separate forbidden page. That mirrors the portal's original
//! navigation contract.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::routes::auth::COOKIE_NAME;
use crate::services::profile::Role;
use crate::services::session::{self, AuthUser};
use crate::state::AppState;

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AuthenticationRequired,
    AccessDenied,
}

impl Notice {
    /// User-facing transient notice shown on the login view.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "Please log in to continue.",
            Self::AccessDenied => "You don't have permission to access this page.",
        }
    }

    /// Stable value carried in the redirect's `notice` query parameter.
    #[must_use]
    pub fn as_query(self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "authentication-required",
            Self::AccessDenied => "access-denied",
        }
    }

    #[must_use]
    pub fn from_query(raw: &str) -> Option<Self> {
        match raw {
            "authentication-required" => Some(Self::AuthenticationRequired),
            "access-denied" => Some(Self::AccessDenied),
            _ => None,
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectLogin(Notice),
}

/// Decide whether a caller may enter a protected route.
///
/// No identity denies with [`Notice::AuthenticationRequired`]; an identity
/// whose role does not equal a required role denies with
/// [`Notice::AccessDenied`]. A required role of `None` admits any
/// authenticated caller.
#[must_use]
pub fn decide(user: Option<&AuthUser>, required: Option<Role>) -> Decision {
    let Some(user) = user else {
        return Decision::RedirectLogin(Notice::AuthenticationRequired);
    };

    match required {
        Some(role) if user.role != role => Decision::RedirectLogin(Notice::AccessDenied),
        _ => Decision::Allow,
    }
}

fn redirect_login(notice: Notice) -> Response {
    Redirect::to(&format!("/login?notice={}", notice.as_query())).into_response()
}

/// Middleware wrapping a protected route group. Rebuilds the caller
/// identity, runs [`decide`], and on allow makes the identity available to
/// handlers via request extensions.
///
/// A session-lookup failure is treated as an unauthenticated request.
pub async fn require_role(
    State((state, required)): State<(AppState, Option<Role>)>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();

    let user = if token.is_empty() {
        None
    } else {
        session::resolve_auth_user(&state.pool, token).await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "auth check failed");
            None
        })
    };

    match decide(user.as_ref(), required) {
        Decision::Allow => {
            if let Some(user) = user {
                req.extensions_mut().insert(user);
            }
            next.run(req).await
        }
        Decision::RedirectLogin(notice) => redirect_login(notice),
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
