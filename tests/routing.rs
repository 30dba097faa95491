//! Integration tests for route resolution and precedence.

use portico::config::ServiceId;
use portico::proxy::routing::resolve;

#[test]
fn precedence_ordering_comprehensive() {
    // Docs beats the generic api form for every known service.
    let matched = resolve("/payments/docs", None).unwrap();
    assert_eq!(matched.service, ServiceId::Payments);
    assert_eq!(matched.path, "docs");

    // Callback beats the generic form for payments.
    let matched = resolve("/payments/callback/notify", None).unwrap();
    assert_eq!(matched.path, "callback/notify");
    assert!(!matched.auth_required);

    // Generic api is the last predicate evaluated.
    let matched = resolve("/orders/api/123", None).unwrap();
    assert_eq!(matched.service, ServiceId::Orders);
    assert_eq!(matched.path, "api/123");
    assert!(matched.auth_required);
}

#[test]
fn auth_requirement_per_service() {
    assert!(!resolve("/auth/api/login", None).unwrap().auth_required);
    assert!(!resolve("/products/api/items", None).unwrap().auth_required);
    assert!(resolve("/orders/api/123", None).unwrap().auth_required);
}

#[test]
fn payments_exposes_only_callback_and_docs() {
    assert!(resolve("/payments/api/refund", None).is_none());
    assert!(resolve("/payments/docs", None).is_some());
    assert!(resolve("/payments/callback/x", None).is_some());
}

#[test]
fn openapi_resolution_covers_all_doc_pages() {
    for service in ServiceId::ALL {
        let referer = format!("http://gateway:8000/{service}/docs");
        let matched = resolve("/openapi.json", Some(&referer)).unwrap();
        assert_eq!(matched.service, service);
        assert_eq!(matched.path, "openapi.json");
    }
}

#[test]
fn openapi_with_foreign_referer_is_not_found() {
    assert!(resolve("/openapi.json", Some("http://example.com/")).is_none());
    assert!(resolve("/openapi.json", Some("http://gateway/billing/docs")).is_none());
}

#[test]
fn unknown_shapes_are_not_found() {
    assert!(resolve("/", None).is_none());
    assert!(resolve("/orders", None).is_none());
    assert!(resolve("/orders/api", None).is_none());
    assert!(resolve("/unknown/api/x", None).is_none());
    assert!(resolve("/a/b/api/c", None).is_none());
    assert!(resolve("/a/b/docs", None).is_none());
}

#[test]
fn rewritten_paths_drop_the_public_prefix() {
    assert_eq!(resolve("/auth/api/login", None).unwrap().path, "api/login");
    assert_eq!(
        resolve("/payments/callback/provider/1", None).unwrap().path,
        "callback/provider/1"
    );
    assert_eq!(resolve("/products/docs", None).unwrap().path, "docs");
}
