//! Route resolution for incoming public paths.
//!
//! [`resolve`] evaluates an explicit, ordered list of route predicates:
//! the OpenAPI schema route, the per-service docs routes, the payment
//! callback, and finally the generic `/{service}/api/*` form. The
//! precedence lives in one function body so it is directly testable.

use crate::config::ServiceId;

/// Outcome of matching a public path: which service to contact, the
/// rewritten downstream path (no leading slash), and whether the auth
/// gate applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub service: ServiceId,
    pub path: String,
    pub auth_required: bool,
}

impl RouteMatch {
    fn public(service: ServiceId, path: impl Into<String>) -> Self {
        Self {
            service,
            path: path.into(),
            auth_required: false,
        }
    }
}

/// Match a request path against the known route shapes, in precedence
/// order. `referer` is only consulted for `/openapi.json`. Returns
/// `None` for unknown shapes or service names — the caller answers 404
/// without contacting any downstream.
#[must_use]
pub fn resolve(path: &str, referer: Option<&str>) -> Option<RouteMatch> {
    if path == "/openapi.json" {
        return resolve_openapi(referer);
    }
    if let Some(matched) = match_docs(path) {
        return Some(matched);
    }
    if let Some(matched) = match_payment_callback(path) {
        return Some(matched);
    }
    match_api(path)
}

/// `/openapi.json` — the schema fetched by a downstream's docs page.
///
/// The path itself does not say which service's schema is wanted; the
/// only disambiguator is the `Referer` of the docs page that loads it.
fn resolve_openapi(referer: Option<&str>) -> Option<RouteMatch> {
    let referer = referer?;
    ServiceId::ALL
        .into_iter()
        .find(|service| {
            referer
                .strip_suffix("/docs")
                .is_some_and(|rest| rest.ends_with(service.as_str()))
        })
        .map(|service| RouteMatch::public(service, "openapi.json"))
}

/// `/{service}/docs` — documentation passthrough, never authenticated.
fn match_docs(path: &str) -> Option<RouteMatch> {
    let segment = path.strip_prefix('/')?.strip_suffix("/docs")?;
    if segment.contains('/') {
        return None;
    }
    let service = ServiceId::from_path_segment(segment)?;
    Some(RouteMatch::public(service, "docs"))
}

/// `/payments/callback/*` — payment-provider callbacks cannot carry an
/// internal token, so auth is never required here.
fn match_payment_callback(path: &str) -> Option<RouteMatch> {
    let rest = path.strip_prefix("/payments/callback/")?;
    Some(RouteMatch::public(
        ServiceId::Payments,
        format!("callback/{rest}"),
    ))
}

/// `/{service}/api/*` — the generic API form. Payments is deliberately
/// excluded: it exposes only the callback and docs routes.
fn match_api(path: &str) -> Option<RouteMatch> {
    let rest = path.strip_prefix('/')?;
    let (segment, tail) = rest.split_once("/api/")?;
    if segment.contains('/') {
        return None;
    }

    let service = match ServiceId::from_path_segment(segment)? {
        ServiceId::Payments => return None,
        service => service,
    };

    let auth_required = !matches!(service, ServiceId::Auth | ServiceId::Products);
    Some(RouteMatch {
        service,
        path: format!("api/{tail}"),
        auth_required,
    })
}
