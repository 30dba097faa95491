//! Downstream dispatch over the shared pooled client.
//!
//! [`forward`] issues a single HTTP request to the resolved service and
//! fully buffers the response before returning it, so the caller never
//! sees a partially relayed body. Transport failures and timeouts both
//! surface as [`GatewayError::BadGateway`]; downstream 4xx/5xx are
//! ordinary results relayed as-is. There are no retries.

use std::time::Duration;

use axum::http::{HeaderMap, Method};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::StatusCode;

use crate::error::GatewayError;
use crate::server::HttpClient;

pub struct ForwardRequest<'a> {
    pub client: &'a HttpClient,
    pub method: &'a Method,
    /// Base URL of the downstream service, no trailing slash.
    pub base_url: &'a str,
    /// Rewritten downstream path, no leading slash.
    pub path: &'a str,
    /// Raw query string from the inbound request. Passed through as-is,
    /// which preserves parameter order and multiplicity.
    pub query: Option<&'a str>,
    pub headers: &'a HeaderMap,
    pub body: &'a Bytes,
    pub timeout: Duration,
}

pub async fn forward(
    req: ForwardRequest<'_>,
) -> Result<(StatusCode, HeaderMap, Bytes), GatewayError> {
    let uri = match req.query {
        Some(query) => format!("{}/{}?{}", req.base_url, req.path, query),
        None => format!("{}/{}", req.base_url, req.path),
    };

    let mut builder = hyper::Request::builder().method(req.method.clone()).uri(uri);
    for (key, value) in req.headers {
        builder = builder.header(key, value);
    }

    let outbound = builder
        .body(Full::new(req.body.clone()))
        .map_err(|e| GatewayError::BadGateway {
            source: Box::new(e),
        })?;

    // One bounded timeout for the whole cycle: any wait for a pooled
    // connection, connect, write, and reading the complete body. A
    // downstream that returns headers and then stalls the body must
    // still surface as a 502, not hold the connection open.
    let exchange = async {
        let response = req
            .client
            .request(outbound)
            .await
            .map_err(|e| GatewayError::BadGateway {
                source: Box::new(e),
            })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| GatewayError::BadGateway {
                source: Box::new(e),
            })?
            .to_bytes();

        Ok((status, headers, body))
    };

    tokio::time::timeout(req.timeout, exchange)
        .await
        .map_err(|_| GatewayError::BadGateway {
            source: "downstream request timed out".into(),
        })?
}
