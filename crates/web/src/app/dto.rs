use serde::{Deserialize, Serialize};

use medimart_auth::SessionPrincipal;

/// Session handed over by the login flow after the backend issued a token.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub token: String,
    pub user: SessionPrincipal,
}

/// Echo of the accepted session; the client persists this in storage under
/// the `token` and `user` keys.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: SessionPrincipal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}
