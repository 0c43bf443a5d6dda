//! Client-side guard: holds back a screen until the cached session checks out.
//!
//! The guard is a small state machine. `check` reads persistent storage and
//! returns a [`Navigation`] instead of navigating itself; a [`GuardAdapter`]
//! (or any host) applies it. Each mount owns its own state, nothing is cached
//! between instances.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::claims::{SessionError, validate_token};
use crate::routes::LOGIN_PATH;
use crate::session::clear_session;
use crate::storage::{Storage, TOKEN_KEY, USER_KEY};
use crate::{RequiredRole, Role, SessionPrincipal};

/// Content shown while the check is pending, unless the host supplies its own.
pub const DEFAULT_FALLBACK: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuardConfig {
    pub required_role: RequiredRole,
    /// Target for unauthenticated visitors.
    pub redirect_to: String,
}

impl GuardConfig {
    pub fn new(required_role: RequiredRole) -> Self {
        Self {
            required_role,
            ..Self::default()
        }
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            required_role: RequiredRole::Any,
            redirect_to: LOGIN_PATH.to_string(),
        }
    }
}

/// Navigation the host must perform after a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    /// Client-side replace navigation, not a full reload.
    Redirect(String),
}

/// Why a guard refused to render its children.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuardDenial {
    #[error("no session token in storage")]
    MissingToken,

    #[error(transparent)]
    InvalidSession(#[from] SessionError),

    #[error("no usable cached principal")]
    MissingPrincipal,

    #[error("role '{role}' does not meet the requirement")]
    WrongRole { role: Role },
}

impl GuardDenial {
    /// Wrong-role denials go to the principal's landing page; everything
    /// else is an authentication failure and goes to the configured target.
    fn redirect_target(&self, config: &GuardConfig) -> String {
        match self {
            GuardDenial::WrongRole { role } => role.landing_path().to_string(),
            _ => config.redirect_to.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Pending,
    Granted(SessionPrincipal),
    Denied(GuardDenial),
}

/// What the guarded screen should show right now.
#[derive(Debug, PartialEq, Eq)]
pub enum View<'a, C: ?Sized, F: ?Sized> {
    Fallback(&'a F),
    Children(&'a C),
    Nothing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Guard {
    config: GuardConfig,
    phase: Phase,
}

impl Guard {
    /// A freshly mounted guard. Nothing has been checked yet.
    pub fn mount(config: GuardConfig) -> Self {
        Self {
            config,
            phase: Phase::Pending,
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending)
    }

    pub fn is_granted(&self) -> bool {
        matches!(self.phase, Phase::Granted(_))
    }

    pub fn principal(&self) -> Option<&SessionPrincipal> {
        match &self.phase {
            Phase::Granted(principal) => Some(principal),
            _ => None,
        }
    }

    pub fn denial(&self) -> Option<&GuardDenial> {
        match &self.phase {
            Phase::Denied(denial) => Some(denial),
            _ => None,
        }
    }

    /// Run the access check against `storage`.
    ///
    /// An invalid or expired token purges the stored session. No other path
    /// writes to storage.
    pub fn check<S: Storage + ?Sized>(&mut self, storage: &mut S, now: DateTime<Utc>) -> Navigation {
        match resolve(&self.config, storage, now) {
            Ok(principal) => {
                tracing::debug!(user_id = %principal.id, role = %principal.role, "guard granted");
                self.phase = Phase::Granted(principal);
                Navigation::Stay
            }
            Err(denial) => {
                if let GuardDenial::InvalidSession(ref err) = denial {
                    tracing::warn!(reason = %err, "purging invalid stored session");
                    clear_session(storage);
                }
                let target = denial.redirect_target(&self.config);
                tracing::info!(reason = %denial, to = %target, "guard redirect");
                self.phase = Phase::Denied(denial);
                Navigation::Redirect(target)
            }
        }
    }

    /// Swap in a new configuration. A changed configuration puts the guard
    /// back to pending and returns `true`; the host must call `check` again.
    pub fn reconfigure(&mut self, config: GuardConfig) -> bool {
        if config == self.config {
            return false;
        }
        self.config = config;
        self.phase = Phase::Pending;
        true
    }

    pub fn render<'a, C: ?Sized, F: ?Sized>(&self, children: &'a C, fallback: &'a F) -> View<'a, C, F> {
        match self.phase {
            Phase::Pending => View::Fallback(fallback),
            Phase::Granted(_) => View::Children(children),
            Phase::Denied(_) => View::Nothing,
        }
    }
}

fn resolve<S: Storage + ?Sized>(
    config: &GuardConfig,
    storage: &S,
    now: DateTime<Utc>,
) -> Result<SessionPrincipal, GuardDenial> {
    let token = storage
        .get(TOKEN_KEY)
        .filter(|t| !t.is_empty())
        .ok_or(GuardDenial::MissingToken)?;

    validate_token(&token, now)?;

    // A token alone is not enough to infer identity.
    let principal = storage
        .get(USER_KEY)
        .and_then(|raw| SessionPrincipal::from_json(&raw).ok())
        .ok_or(GuardDenial::MissingPrincipal)?;

    if !principal.role.satisfies(config.required_role) {
        return Err(GuardDenial::WrongRole {
            role: principal.role,
        });
    }

    Ok(principal)
}

/// Client-side router hook.
pub trait Navigator {
    fn replace(&mut self, path: &str);
}

/// Binds a storage and a navigator so hosts can mount guards in one call.
pub struct GuardAdapter<S, N> {
    storage: S,
    navigator: N,
}

impl<S: Storage, N: Navigator> GuardAdapter<S, N> {
    pub fn new(storage: S, navigator: N) -> Self {
        Self { storage, navigator }
    }

    /// Mount a guard, run its check and apply the resulting navigation.
    pub fn mount_and_check(&mut self, config: GuardConfig, now: DateTime<Utc>) -> Guard {
        let mut guard = Guard::mount(config);
        self.recheck(&mut guard, now);
        guard
    }

    /// Re-run the check for an existing guard (after `reconfigure` or a router change).
    pub fn recheck(&mut self, guard: &mut Guard, now: DateTime<Utc>) {
        if let Navigation::Redirect(path) = guard.check(&mut self.storage, now) {
            self.navigator.replace(&path);
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn into_parts(self) -> (S, N) {
        (self.storage, self.navigator)
    }
}
