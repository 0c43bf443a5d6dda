use medimart_auth::{RouteClass, SessionCookies, UserId};

/// What the edge gate learned about a request it let through.
///
/// Inserted as a request extension by the edge middleware; pages read it
/// instead of re-parsing cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateContext {
    route_class: RouteClass,
    authenticated: bool,
    admin: bool,
    user_id: Option<UserId>,
}

impl GateContext {
    pub fn new(route_class: RouteClass, cookies: &SessionCookies, authenticated: bool) -> Self {
        let user_id = if authenticated {
            cookies.user_id.as_deref().and_then(|id| id.parse().ok())
        } else {
            None
        };
        Self {
            route_class,
            authenticated,
            admin: authenticated && cookies.is_admin(),
            user_id,
        }
    }

    pub fn route_class(&self) -> RouteClass {
        self.route_class
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }
}
