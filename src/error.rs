//! Unified error types for Portico.
//!
//! [`GatewayError`] covers both request-path failures (auth, routing,
//! downstream transport) and startup failures (bad address, invalid
//! base URL). Request-path variants convert into HTTP responses via
//! [`IntoResponse`]; the mapping is the gateway's entire error surface:
//! 401 for auth failures, 404 for unknown routes, 502 for unreachable
//! downstreams. Downstream 4xx/5xx responses are relayed verbatim and
//! never pass through this type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// Missing token on an auth-required route, or a token that is
    /// malformed or fails signature verification.
    #[error("{0}")]
    Unauthenticated(&'static str),

    /// Token verified but its issued-at is older than the configured TTL.
    /// Reported to the caller identically to [`Self::Unauthenticated`];
    /// kept separate for diagnostics.
    #[error("JWT expired")]
    TokenExpired,

    /// Unknown service name or path shape. No downstream is contacted.
    #[error("Not Found")]
    RouteNotFound,

    /// Downstream unreachable, connection refused, or timed out.
    #[error("Bad Gateway: {source}")]
    BadGateway {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid base URL for {service} service: {message}")]
    InvalidBaseUrl {
        service: &'static str,
        message: String,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}

impl GatewayError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) | Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Transport details stay in the logs, not on the public surface.
        let detail = match &self {
            Self::BadGateway { .. } => "Bad Gateway".to_string(),
            other => other.to_string(),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_map_to_401() {
        assert_eq!(
            GatewayError::Unauthenticated("JWT token required").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(GatewayError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn route_not_found_maps_to_404() {
        assert_eq!(GatewayError::RouteNotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_gateway_maps_to_502_and_hides_transport_detail() {
        let err = GatewayError::BadGateway {
            source: "connection refused".into(),
        };
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
