//! Cookie half of the login/logout transaction.
//!
//! The client calls these alongside writing (or clearing) its storage copy, so
//! the edge gate and the client guard read the same session.

use std::sync::Arc;

use axum::{
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;

use medimart_auth::{EstablishedSession, session::SESSION_COOKIE_NAMES};

use crate::app::{dto, errors};
use crate::config::WebConfig;

pub async fn create_session(
    Extension(config): Extension<Arc<WebConfig>>,
    jar: CookieJar,
    body: Result<Json<dto::CreateSessionRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text());
        }
    };

    let now = Utc::now();
    let session = match EstablishedSession::new(body.token, body.user, now) {
        Ok(session) => session,
        Err(err) => {
            tracing::info!(reason = %err, "rejected session handover");
            return errors::session_error_to_response(err);
        }
    };

    let max_age = session.cookie_max_age(now);
    let jar = session
        .cookies()
        .into_iter()
        .fold(jar, |jar, (name, value)| {
            jar.add(session_cookie(name, value, &config, max_age))
        });

    tracing::info!(
        user_id = %session.principal().id,
        role = %session.principal().role,
        "session established"
    );

    let response = dto::SessionResponse {
        token: session.token().to_string(),
        user: session.principal().clone(),
        expires_at: session.claims().expires_at(),
    };
    (jar, Json(response)).into_response()
}

pub async fn clear_session(jar: CookieJar) -> Response {
    let jar = SESSION_COOKIE_NAMES
        .into_iter()
        .fold(jar, |jar, name| {
            let mut cookie = Cookie::build((name, "")).path("/").build();
            cookie.make_removal();
            jar.add(cookie)
        });

    tracing::info!("session cleared");
    (jar, StatusCode::NO_CONTENT).into_response()
}

fn session_cookie(
    name: &'static str,
    value: String,
    config: &WebConfig,
    max_age: Option<chrono::Duration>,
) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .build();
    if let Some(max_age) = max_age {
        cookie.set_max_age(time::Duration::seconds(max_age.num_seconds()));
    }
    cookie
}
