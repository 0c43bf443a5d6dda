//! Login/logout as a single write path.
//!
//! The client guard reads persistent storage and the edge gate reads cookies.
//! Both copies are produced here from one validated record, and cleared
//! together, so the two gates see the same session.

use chrono::{DateTime, Duration, Utc};

use crate::claims::{Claims, SessionError, validate_token};
use crate::storage::{Storage, TOKEN_KEY, USER_KEY};
use crate::SessionPrincipal;

/// Cookie carrying the raw session token.
pub const TOKEN_COOKIE: &str = "auth-token";

/// Cookie carrying the principal's role string.
pub const ROLE_COOKIE: &str = "user-role";

/// Cookie carrying the principal's numeric id.
pub const USER_ID_COOKIE: &str = "user-id";

/// Every cookie a logout must expire.
pub const SESSION_COOKIE_NAMES: [&str; 3] = [TOKEN_COOKIE, ROLE_COOKIE, USER_ID_COOKIE];

/// A freshly issued session, checked once before either copy is written.
#[derive(Debug, Clone, PartialEq)]
pub struct EstablishedSession {
    token: String,
    principal: SessionPrincipal,
    claims: Claims,
}

impl EstablishedSession {
    /// Accept a token/principal pair from the login flow.
    ///
    /// Rejects tokens that are malformed or already expired, so neither store
    /// ever holds a session the gates would immediately refuse.
    pub fn new(
        token: impl Into<String>,
        principal: SessionPrincipal,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let token = token.into();
        let claims = validate_token(&token, now)?;
        Ok(Self {
            token,
            principal,
            claims,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn principal(&self) -> &SessionPrincipal {
        &self.principal
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Write the storage copy (`token` and `user` keys).
    pub fn persist<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), serde_json::Error> {
        let user = self.principal.to_json()?;
        storage.set(TOKEN_KEY, self.token.clone());
        storage.set(USER_KEY, user);
        Ok(())
    }

    /// The cookie copy, as `(name, value)` pairs.
    pub fn cookies(&self) -> [(&'static str, String); 3] {
        [
            (TOKEN_COOKIE, self.token.clone()),
            (ROLE_COOKIE, self.principal.role.as_str().to_string()),
            (USER_ID_COOKIE, self.principal.id.to_string()),
        ]
    }

    /// Remaining lifetime of the token, if it carries an expiry.
    pub fn cookie_max_age(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.claims
            .expires_at()
            .map(|expires_at| (expires_at - now).max(Duration::zero()))
    }
}

/// Remove the storage copy of the session.
pub fn clear_session<S: Storage + ?Sized>(storage: &mut S) {
    storage.remove(TOKEN_KEY);
    storage.remove(USER_KEY);
}
