//! Session decoder: reads the claim payload of a bearer token.
//!
//! The token is the three-part `header.payload.signature` format issued by the
//! backend at login. Only the payload is decoded here; the signature is never
//! checked. Decoding establishes that a token is parseable, not that it is
//! trusted. The backend rejects tampered tokens on the API calls it serves.

use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Standard alphabet after URL-safe substitution; padding optional.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decoded (unverified) token payload: claim name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Look up any claim by name, `exp` included.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Expiry in seconds since the Unix epoch. Fractional seconds are kept.
    ///
    /// An `exp` that is not a JSON number carries no usable expiry and reads
    /// as `None`.
    pub fn exp(&self) -> Option<f64> {
        self.0.get("exp").and_then(Value::as_f64)
    }

    /// Whether the token expired strictly before `now`.
    ///
    /// Compared at millisecond resolution, so a token whose `exp` is exactly
    /// `now` stays valid. Tokens without a numeric `exp` never expire here.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.exp() {
            Some(exp) => exp * 1000.0 < now.timestamp_millis() as f64,
            None => false,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.exp()?;
        let secs = exp.floor();
        let nanos = ((exp - secs) * 1e9) as u32;
        DateTime::from_timestamp(secs as i64, nanos)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected 3 token segments, found {0}")]
    Segments(usize),

    #[error("payload is not valid base64: {0}")]
    Base64(String),

    #[error("payload is not valid UTF-8")]
    Utf8,

    #[error("payload is not a JSON object: {0}")]
    Json(String),
}

/// Outcome of checking a token for use as a session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("malformed session token: {0}")]
    Malformed(#[from] DecodeError),

    #[error("session token expired")]
    Expired,
}

/// Decode the claims payload of `token` without verifying its signature.
///
/// Every malformed input comes back as a `DecodeError`; this never panics.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::Segments(segments.len()));
    }

    let payload = segments[1].replace('-', "+").replace('_', "/");
    let bytes = PAYLOAD_ENGINE
        .decode(payload.as_bytes())
        .map_err(|e| DecodeError::Base64(e.to_string()))?;

    let text = String::from_utf8(bytes).map_err(|_| DecodeError::Utf8)?;

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(claims)) => Ok(Claims(claims)),
        Ok(_) => Err(DecodeError::Json("payload is not an object".to_string())),
        Err(e) => Err(DecodeError::Json(e.to_string())),
    }
}

/// Decode `token` and reject it if it has expired.
///
/// Both gates go through this one function, so an expired token and an
/// unparseable one are treated the same way everywhere.
pub fn validate_token(token: &str, now: DateTime<Utc>) -> Result<Claims, SessionError> {
    let claims = decode_claims(token)?;
    if claims.is_expired(now) {
        return Err(SessionError::Expired);
    }
    Ok(claims)
}


#[cfg(test)]
mod tests {
    use super::test_support::token_with_payload;
    use super::*;
    use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
    use chrono::Duration;
    use proptest::prelude::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn decodes_payload_claims() {
        let token = token_with_payload(&json!({"exp": 1_700_000_100, "sub": "42", "role": "admin"}));

        let claims = decode_claims(&token).unwrap();

        assert_eq!(claims.exp(), Some(1_700_000_100.0));
        assert_eq!(claims.get("sub"), Some(&json!("42")));
        assert_eq!(claims.get("role"), Some(&json!("admin")));
        assert_eq!(claims.get("exp"), Some(&json!(1_700_000_100)));
        assert_eq!(claims.as_map().len(), 3);
    }

    #[test]
    fn accepts_padded_payload() {
        let body = STANDARD.encode(r#"{"a":1}"#);
        assert!(body.ends_with('='));
        let token = format!("h.{body}.s");

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.get("a"), Some(&json!(1)));
        assert_eq!(claims.exp(), None);
    }

    #[test]
    fn url_safe_characters_are_substituted() {
        // "?>?" encodes to "Pz4/" in the standard alphabet.
        let payload = json!({"k": "?>?"});
        let token = token_with_payload(&payload);
        assert!(token.split('.').nth(1).unwrap().contains('_'));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.get("k"), Some(&json!("?>?")));
    }

    #[test]
    fn wrong_segment_count_is_rejected() {
        assert_eq!(decode_claims("abc"), Err(DecodeError::Segments(1)));
        assert_eq!(decode_claims("a.b"), Err(DecodeError::Segments(2)));
        assert_eq!(decode_claims("a.b.c.d"), Err(DecodeError::Segments(4)));
        assert_eq!(decode_claims(""), Err(DecodeError::Segments(1)));
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let err = decode_claims("h.!!!notbase64!!!.s").unwrap_err();
        assert!(matches!(err, DecodeError::Base64(_)));
    }

    #[test]
    fn non_utf8_payload_is_rejected() {
        let body = URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]);
        assert_eq!(decode_claims(&format!("h.{body}.s")), Err(DecodeError::Utf8));
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        for payload in [json!([1, 2, 3]), json!("text"), json!(12), json!(null)] {
            let err = decode_claims(&token_with_payload(&payload)).unwrap_err();
            assert!(matches!(err, DecodeError::Json(_)), "{payload}");
        }

        let body = URL_SAFE_NO_PAD.encode("{not json");
        assert!(matches!(decode_claims(&format!("h.{body}.s")), Err(DecodeError::Json(_))));
    }

    #[test]
    fn non_numeric_exp_decodes_without_expiry() {
        let token = token_with_payload(&json!({"exp": "tomorrow"}));

        let claims = decode_claims(&token).unwrap();

        assert_eq!(claims.get("exp"), Some(&json!("tomorrow")));
        assert_eq!(claims.exp(), None);
        assert!(!claims.is_expired(now()));
    }

    #[test]
    fn fractional_exp_is_a_valid_expiry() {
        let now = now();
        let live = token_with_payload(&json!({"exp": 1_700_000_600.5}));
        let expired = token_with_payload(&json!({"exp": 1_699_999_999.5}));

        let claims = validate_token(&live, now).unwrap();
        assert_eq!(claims.exp(), Some(1_700_000_600.5));
        assert_eq!(
            claims.expires_at(),
            DateTime::from_timestamp(1_700_000_600, 500_000_000)
        );
        assert_eq!(validate_token(&expired, now), Err(SessionError::Expired));

        // Half a second past `exp` is expired; exactly `exp` is not.
        let edge = token_with_payload(&json!({"exp": 1_700_000_000.5}));
        assert!(validate_token(&edge, now + Duration::milliseconds(500)).is_ok());
        assert_eq!(
            validate_token(&edge, now + Duration::milliseconds(501)),
            Err(SessionError::Expired)
        );
    }

    #[test]
    fn expiry_is_strictly_before_now() {
        let now = now();
        let at = |exp: i64| {
            let mut claims = Map::new();
            claims.insert("exp".to_string(), json!(exp));
            Claims::new(claims)
        };

        assert!(at(now.timestamp() - 1).is_expired(now));
        assert!(!at(now.timestamp()).is_expired(now));
        assert!(!at(now.timestamp() + 60).is_expired(now));
        assert!(at(now.timestamp()).is_expired(now + Duration::milliseconds(1)));
        assert!(!Claims::default().is_expired(now));
    }

    #[test]
    fn validate_token_rejects_expired_and_malformed() {
        let now = now();
        let expired = token_with_payload(&json!({"exp": now.timestamp() - 10}));
        let live = token_with_payload(&json!({"exp": now.timestamp() + 10}));

        assert_eq!(validate_token(&expired, now), Err(SessionError::Expired));
        assert!(matches!(
            validate_token("garbage", now),
            Err(SessionError::Malformed(DecodeError::Segments(1)))
        ));
        assert_eq!(validate_token(&live, now).unwrap().exp(), Some((now.timestamp() + 10) as f64));
    }

    proptest! {
        /// Property: arbitrary input never panics the decoder.
        #[test]
        fn decoder_never_panics(input in ".*") {
            let _ = decode_claims(&input);
        }

        /// Property: anything without exactly three segments is rejected.
        #[test]
        fn wrong_segment_counts_always_fail(parts in prop::collection::vec("[A-Za-z0-9_-]{0,12}", 0..8usize)) {
            prop_assume!(parts.len() != 3);
            let token = parts.join(".");
            prop_assert!(decode_claims(&token).is_err());
        }

        /// Property: any past `exp` is invalid for session use.
        #[test]
        fn past_exp_is_always_expired(age in 1i64..10_000_000) {
            let now = now();
            let token = token_with_payload(&json!({"exp": now.timestamp() - age}));
            prop_assert_eq!(validate_token(&token, now), Err(SessionError::Expired));
        }
    }
}
