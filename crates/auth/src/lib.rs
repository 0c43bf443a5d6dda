//! `medimart-auth` — access-control gate for the storefront (pure, no I/O).
//!
//! This crate is intentionally decoupled from HTTP and from any concrete
//! storage: the edge gate works on cookie values handed in by the web layer,
//! the client guard works through the [`Storage`] and [`Navigator`] traits.

pub mod claims;
pub mod edge;
pub mod guard;
pub mod principal;
pub mod roles;
pub mod routes;
pub mod session;
pub mod storage;

pub use claims::{Claims, DecodeError, SessionError, decode_claims, validate_token};
pub use edge::{EdgeRequest, GateDecision, RedirectReason, SessionCookies, evaluate};
pub use guard::{Guard, GuardAdapter, GuardConfig, GuardDenial, Navigation, Navigator, View};
pub use principal::{SessionPrincipal, UserId};
pub use roles::{RequiredRole, Role, UnknownRole};
pub use routes::{RouteClass, classify};
pub use session::{EstablishedSession, clear_session};
pub use storage::{MemoryStorage, Storage};
