//! Outbound header construction and the public/internal trust boundary.
//!
//! [`build_forwarded_headers`] clones the inbound headers, removes
//! `Host` (it must reflect the downstream host, not the gateway's),
//! strips hop-by-hop headers, drops any caller-supplied header that
//! shares a name with a trust header, and finally merges the trust
//! headers derived from a validated token. Trust headers always win;
//! caller-supplied duplicates are never forwarded, with or without a
//! token on the request.

use std::sync::LazyLock;

use axum::http::{header, HeaderMap, HeaderName};

use crate::auth::{self, Claims};

static HOP_BY_HOP: LazyLock<Vec<HeaderName>> = LazyLock::new(|| {
    [
        "connection",
        "keep-alive",
        "transfer-encoding",
        "te",
        "trailer",
        "upgrade",
        "proxy-authorization",
        "proxy-authenticate",
    ]
    .iter()
    .filter_map(|name| name.parse::<HeaderName>().ok())
    .collect()
});

pub fn build_forwarded_headers(original: &HeaderMap, claims: Option<&Claims>) -> HeaderMap {
    let mut headers = original.clone();

    // The client sets Host from the downstream authority.
    headers.remove(header::HOST);

    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }

    // Identity-shaped headers from the public side are never forwarded;
    // only the gateway may assert them.
    for name in auth::TRUST_HEADERS {
        headers.remove(*name);
    }

    if let Some(claims) = claims {
        headers.extend(auth::trust_headers(claims));
    }

    headers
}

/// Strip hop-by-hop headers and `content-length` from a downstream response.
///
/// The body has already been fully collected by the forwarder, so
/// `transfer-encoding` and `content-length` from the origin are no longer
/// accurate. Axum will set the correct `content-length` based on the actual
/// body bytes.
pub fn strip_response_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers.remove(header::CONTENT_LENGTH);
}
