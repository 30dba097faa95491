//! Gateway configuration: JWT settings and downstream service locations.
//!
//! [`GatewayConfig`] is built once at startup from CLI arguments, validated,
//! and shared read-only across all request handlers. There is no hot
//! reloading — the route shapes and service set are fixed by the gateway's
//! contract, so a restart is the only way configuration changes.

use std::time::Duration;

use url::Url;

use crate::error::GatewayError;

/// Logical downstream services the gateway fronts.
///
/// One parameterized descriptor per service, keyed by identifier — the
/// services differ only by base URL, never by behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Auth,
    Products,
    Orders,
    Payments,
}

impl ServiceId {
    pub const ALL: [Self; 4] = [Self::Auth, Self::Products, Self::Orders, Self::Payments];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Payments => "payments",
        }
    }

    /// Resolve a public path segment to a service. Unknown names yield
    /// `None`, which the router turns into a 404 without any downstream call.
    #[must_use]
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "auth" => Some(Self::Auth),
            "products" => Some(Self::Products),
            "orders" => Some(Self::Orders),
            "payments" => Some(Self::Payments),
            _ => None,
        }
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base URLs of the downstream services, as supplied on the command line.
#[derive(Debug, Clone)]
pub struct ServiceUrls {
    pub auth: String,
    pub products: String,
    pub orders: String,
    pub payments: String,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub jwt_secret: String,
    pub jwt_ttl: Duration,
    pub request_timeout: Duration,
    auth_url: String,
    products_url: String,
    orders_url: String,
    payments_url: String,
}

impl GatewayConfig {
    pub fn new(
        jwt_secret: String,
        jwt_ttl: Duration,
        request_timeout: Duration,
        urls: &ServiceUrls,
    ) -> Result<Self, GatewayError> {
        Ok(Self {
            jwt_secret,
            jwt_ttl,
            request_timeout,
            auth_url: normalize_base_url("auth", &urls.auth)?,
            products_url: normalize_base_url("products", &urls.products)?,
            orders_url: normalize_base_url("orders", &urls.orders)?,
            payments_url: normalize_base_url("payments", &urls.payments)?,
        })
    }

    /// Base URL of a downstream service, without trailing slash.
    #[must_use]
    pub fn base_url(&self, service: ServiceId) -> &str {
        match service {
            ServiceId::Auth => &self.auth_url,
            ServiceId::Products => &self.products_url,
            ServiceId::Orders => &self.orders_url,
            ServiceId::Payments => &self.payments_url,
        }
    }
}

/// Validate a base URL and normalize it for path concatenation.
fn normalize_base_url(service: &'static str, raw: &str) -> Result<String, GatewayError> {
    let parsed = Url::parse(raw).map_err(|_| GatewayError::InvalidBaseUrl {
        service,
        message: format!("'{raw}' is not a valid URL"),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(GatewayError::InvalidBaseUrl {
            service,
            message: format!("unsupported scheme '{scheme}' (expected http or https)"),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}
