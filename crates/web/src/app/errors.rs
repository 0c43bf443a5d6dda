use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use medimart_auth::SessionError;

pub fn session_error_to_response(err: SessionError) -> axum::response::Response {
    match err {
        SessionError::Expired => json_error(StatusCode::UNAUTHORIZED, "session_expired", err.to_string()),
        SessionError::Malformed(_) => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_session", err.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
