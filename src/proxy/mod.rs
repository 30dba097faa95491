//! Core gateway pipeline: routing, the auth gate, and forwarding.
//!
//! The [`forward_handler`] function is the Axum fallback that receives
//! every non-`/health` request. Per request it runs:
//! route resolution ([`routing`]) → auth gate (skipped, validated, or
//! rejected — never partially applied) → outbound header construction
//! ([`headers`]) → downstream dispatch ([`forward`]) → verbatim relay.
//!
//! If the caller disconnects mid-flight, Axum drops this future and the
//! in-flight downstream call is cancelled with it.

pub mod forward;
pub mod headers;
pub mod routing;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::SystemTime;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};

use crate::error::GatewayError;
use crate::server::AppState;

pub async fn forward_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    req_headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path();
    let correlation_id = uuid::Uuid::new_v4().to_string();

    let referer = req_headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok());

    let Some(route) = routing::resolve(path, referer) else {
        tracing::warn!(
            correlation_id = %correlation_id,
            method = %method,
            path = %path,
            "no route matched"
        );
        return GatewayError::RouteNotFound.into_response();
    };

    // Auth gate. Either the route is public, or a validated non-expired
    // token was translated into trust headers — no third state. A token
    // supplied on a public route is still validated and translated, so
    // optional-auth routes get identity propagation too.
    let token = bearer_token(&req_headers);
    if route.auth_required && token.is_none() {
        tracing::warn!(
            correlation_id = %correlation_id,
            service = %route.service,
            path = %route.path,
            "missing bearer token on protected route"
        );
        state.stats.rejected.fetch_add(1, Ordering::Relaxed);
        return GatewayError::Unauthenticated("JWT token required").into_response();
    }

    let claims = match token {
        Some(token) => match state.validator.validate(token, SystemTime::now()) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::warn!(
                    correlation_id = %correlation_id,
                    service = %route.service,
                    error = %e,
                    "token validation failed"
                );
                state.stats.rejected.fetch_add(1, Ordering::Relaxed);
                return e.into_response();
            }
        },
        None => None,
    };

    let outbound_headers = headers::build_forwarded_headers(&req_headers, claims.as_ref());

    tracing::info!(
        correlation_id = %correlation_id,
        method = %method,
        service = %route.service,
        path = %route.path,
        auth_required = route.auth_required,
        "proxying request"
    );

    let request = forward::ForwardRequest {
        client: &state.http_client,
        method: &method,
        base_url: state.config.base_url(route.service),
        path: &route.path,
        query: uri.query(),
        headers: &outbound_headers,
        body: &body,
        timeout: state.config.request_timeout,
    };

    match forward::forward(request).await {
        Ok((status, mut resp_headers, body_bytes)) => {
            state.stats.forwarded.fetch_add(1, Ordering::Relaxed);
            headers::strip_response_hop_by_hop(&mut resp_headers);

            let mut builder = Response::builder().status(status);
            for (key, value) in &resp_headers {
                builder = builder.header(key, value);
            }
            builder
                .body(axum::body::Body::from(body_bytes))
                .unwrap_or_else(|e| {
                    tracing::error!(
                        correlation_id = %correlation_id,
                        error = %e,
                        "failed to build relay response"
                    );
                    GatewayError::BadGateway {
                        source: Box::new(e),
                    }
                    .into_response()
                })
        }
        Err(e) => {
            tracing::error!(
                correlation_id = %correlation_id,
                service = %route.service,
                error = %e,
                "downstream request failed"
            );
            state.stats.failed.fetch_add(1, Ordering::Relaxed);
            e.into_response()
        }
    }
}

/// Extract the credential from a standard `Authorization: Bearer <token>`
/// header. Anything else (missing header, other schemes, empty token)
/// is treated as no credential.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
