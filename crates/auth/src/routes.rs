//! Route classification by path prefix.

/// Unauthenticated visitors are sent here.
pub const LOGIN_PATH: &str = "/auth/login";

/// Landing page for admins.
pub const ADMIN_LANDING: &str = "/admin/dashboard";

/// Landing page for regular users.
pub const USER_LANDING: &str = "/dashboard";

/// Access class of a request path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RouteClass {
    /// Requires an authenticated admin.
    Admin,
    /// Requires any authenticated principal.
    User,
    /// Login/register; authenticated principals are sent to their landing page.
    AuthOnly,
    Public,
}

impl RouteClass {
    /// Admin and user routes both require authentication.
    pub fn is_protected(&self) -> bool {
        matches!(self, RouteClass::Admin | RouteClass::User)
    }
}

/// Ordered prefix table. First match wins.
pub const ROUTE_PREFIXES: &[(&str, RouteClass)] = &[
    ("/admin", RouteClass::Admin),
    ("/dashboard", RouteClass::User),
    ("/checkout", RouteClass::User),
    ("/consultation", RouteClass::User),
    ("/onboarding", RouteClass::User),
    ("/auth", RouteClass::AuthOnly),
];

/// Classify `path` into exactly one route class.
pub fn classify(path: &str) -> RouteClass {
    ROUTE_PREFIXES
        .iter()
        .find(|(prefix, _)| matches_prefix(path, prefix))
        .map(|(_, class)| *class)
        .unwrap_or(RouteClass::Public)
}

/// `/admin` matches `/admin` and `/admin/...` but not `/administer`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
