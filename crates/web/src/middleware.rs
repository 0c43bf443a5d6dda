use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use medimart_auth::{
    EdgeRequest, GateDecision, SessionCookies, classify, evaluate,
    session::{ROLE_COOKIE, TOKEN_COOKIE, USER_ID_COOKIE},
};

use crate::context::GateContext;

/// Edge request gate: runs before any page handler.
///
/// Redirects unauthenticated or under-privileged requests with
/// `307 Temporary Redirect`; everything else continues with a
/// [`GateContext`] extension attached.
pub async fn edge_gate(jar: CookieJar, mut req: Request, next: Next) -> Response {
    let cookies = session_cookies(&jar);
    let now = Utc::now();
    let path = req.uri().path().to_owned();

    match evaluate(&EdgeRequest { path: &path, cookies: &cookies }, now) {
        GateDecision::Allow => {
            let authenticated = cookies.is_authenticated(now);
            tracing::debug!(%path, authenticated, "edge gate allow");
            req.extensions_mut()
                .insert(GateContext::new(classify(&path), &cookies, authenticated));
            next.run(req).await
        }
        GateDecision::Redirect { to, reason } => {
            tracing::info!(%path, to, reason = reason.as_str(), "edge gate redirect");
            Redirect::temporary(to).into_response()
        }
    }
}

fn session_cookies(jar: &CookieJar) -> SessionCookies {
    let value = |name: &str| jar.get(name).map(|c| c.value().to_string());
    SessionCookies {
        token: value(TOKEN_COOKIE),
        role: value(ROLE_COOKIE),
        user_id: value(USER_ID_COOKIE),
    }
}
