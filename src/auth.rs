//! Bearer token validation and claim-to-header translation.
//!
//! [`TokenValidator`] verifies an HS256-signed JWT and enforces the
//! issued-at TTL. [`trust_headers`] projects validated claims onto the
//! fixed allow-list of internal trust headers (`user_id`, `role`) that
//! downstream services treat as authoritative identity. Every other
//! claim is dropped.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::GatewayError;

/// Claim names that become trust headers on the outbound request.
/// The same names are stripped from inbound headers so a caller can
/// never assert them directly.
pub const TRUST_HEADERS: &[&str] = &["user_id", "role"];

/// Restricted claim set extracted from a validated token.
///
/// Claims may be any JSON scalar in the token; they are coerced to
/// strings at header-translation time. `timestamp` is the issued-at:
/// when absent it defaults to 0, which guarantees the TTL check fails
/// (fail-closed, not fail-open).
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub role: Option<serde_json::Value>,
    #[serde(default)]
    pub timestamp: i64,
}

/// Verifies token signature and freshness. Pure function of
/// token + current time + configured secret; no side effects.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenValidator {
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry a custom issued-at claim (`timestamp`), not
        // the registered exp/iat claims. Freshness is checked below.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Validate signature and TTL, returning the restricted claim set.
    ///
    /// A malformed token or bad signature is `Unauthenticated`; a valid
    /// token issued more than `ttl` ago is `TokenExpired`.
    pub fn validate(&self, token: &str, now: SystemTime) -> Result<Claims, GatewayError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| GatewayError::Unauthenticated("Invalid JWT token"))?;
        let claims = data.claims;

        let now_secs = now
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let ttl_secs = self.ttl.as_secs();
        let cutoff = i64::try_from(now_secs.saturating_sub(ttl_secs)).unwrap_or(i64::MAX);
        if claims.timestamp < cutoff {
            return Err(GatewayError::TokenExpired);
        }

        Ok(claims)
    }
}

/// Project validated claims onto the trust-header allow-list.
///
/// Headers carry only text, so scalar claims are coerced to strings.
/// Absent claims and values that cannot be represented as a header are
/// silently skipped, never errors.
#[must_use]
pub fn trust_headers(claims: &Claims) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let entries = [
        (HeaderName::from_static("user_id"), &claims.user_id),
        (HeaderName::from_static("role"), &claims.role),
    ];

    for (name, claim) in entries {
        let Some(text) = claim.as_ref().and_then(claim_to_string) else {
            continue;
        };
        if let Ok(value) = HeaderValue::from_str(&text) {
            headers.insert(name, value);
        }
    }

    headers
}

fn claim_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        // Nested structures are not identity material
        _ => None,
    }
}
