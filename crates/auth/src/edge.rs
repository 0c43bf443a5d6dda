//! Edge request gate: the per-request decision made before a page is served.
//!
//! Pure function of path + session cookies + clock. The HTTP layer turns the
//! returned [`GateDecision`] into a redirect response.

use chrono::{DateTime, Utc};

use crate::claims::validate_token;
use crate::routes::{ADMIN_LANDING, LOGIN_PATH, RouteClass, USER_LANDING, classify};
use crate::Role;

/// Session markers carried as request cookies. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SessionCookies {
    pub token: Option<String>,
    pub role: Option<String>,
    pub user_id: Option<String>,
}

impl SessionCookies {
    pub fn new(
        token: Option<impl Into<String>>,
        role: Option<impl Into<String>>,
        user_id: Option<impl Into<String>>,
    ) -> Self {
        Self {
            token: token.map(Into::into),
            role: role.map(Into::into),
            user_id: user_id.map(Into::into),
        }
    }

    fn token(&self) -> Option<&str> {
        present(&self.token)
    }

    fn role(&self) -> Option<&str> {
        present(&self.role)
    }

    fn user_id(&self) -> Option<&str> {
        present(&self.user_id)
    }

    /// Authenticated iff a live token, a role and a user id are all present.
    pub fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        let token_ok = self
            .token()
            .is_some_and(|token| validate_token(token, now).is_ok());
        token_ok && self.role().is_some() && self.user_id().is_some()
    }

    /// Only the exact role string `admin` counts as admin here.
    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin.as_str())
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRequest<'a> {
    pub path: &'a str,
    pub cookies: &'a SessionCookies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectReason {
    /// Protected path without a valid session.
    Unauthenticated,
    /// Login/register visited with a valid session.
    AlreadyAuthenticated,
    /// Admin path visited by a non-admin.
    NotAdmin,
}

impl RedirectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectReason::Unauthenticated => "unauthenticated",
            RedirectReason::AlreadyAuthenticated => "already_authenticated",
            RedirectReason::NotAdmin => "not_admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateDecision {
    Allow,
    Redirect {
        to: &'static str,
        reason: RedirectReason,
    },
}

/// Decide what happens to `request`. First matching rule wins.
pub fn evaluate(request: &EdgeRequest<'_>, now: DateTime<Utc>) -> GateDecision {
    let class = classify(request.path);
    let authenticated = request.cookies.is_authenticated(now);

    if class.is_protected() && !authenticated {
        return GateDecision::Redirect {
            to: LOGIN_PATH,
            reason: RedirectReason::Unauthenticated,
        };
    }

    if class == RouteClass::AuthOnly && authenticated {
        let to = if request.cookies.is_admin() {
            ADMIN_LANDING
        } else {
            USER_LANDING
        };
        return GateDecision::Redirect {
            to,
            reason: RedirectReason::AlreadyAuthenticated,
        };
    }

    if class == RouteClass::Admin && authenticated && !request.cookies.is_admin() {
        return GateDecision::Redirect {
            to: USER_LANDING,
            reason: RedirectReason::NotAdmin,
        };
    }

    GateDecision::Allow
}
