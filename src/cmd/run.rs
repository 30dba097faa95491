//! `portico run` — start the gateway server.
//!
//! Builds the immutable gateway configuration from CLI arguments,
//! constructs the shared state (token validator, pooled HTTP client),
//! and serves until SIGTERM / Ctrl+C, draining in-flight requests on
//! shutdown.

use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::auth::TokenValidator;
use crate::cli::{LogLevel, RunArgs};
use crate::config::{GatewayConfig, ServiceId, ServiceUrls};
use crate::error::GatewayError;
use crate::logging;
use crate::server::{self, AppState, Stats};

pub async fn execute(args: RunArgs) -> Result<(), GatewayError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    let log_level = if args.debug && matches!(args.log_level, LogLevel::Info) {
        LogLevel::Debug
    } else {
        args.log_level.clone()
    };
    logging::init(&log_level, log_format);

    let config = Arc::new(GatewayConfig::new(
        args.jwt_secret,
        Duration::from_secs(args.jwt_ttl),
        Duration::from_secs(args.timeout),
        &ServiceUrls {
            auth: args.auth_url,
            products: args.products_url,
            orders: args.orders_url,
            payments: args.payments_url,
        },
    )?);

    let state = Arc::new(AppState {
        validator: TokenValidator::new(&config.jwt_secret, config.jwt_ttl),
        config: Arc::clone(&config),
        http_client: server::build_http_client(),
        start_time: Instant::now(),
        stats: Stats::new(),
    });

    let router = server::build_router(Arc::clone(&state), args.max_body);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        auth = config.base_url(ServiceId::Auth),
        products = config.base_url(ServiceId::Products),
        orders = config.base_url(ServiceId::Orders),
        payments = config.base_url(ServiceId::Payments),
        timeout_secs = config.request_timeout.as_secs(),
        "portico started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!(
        uptime_seconds = state.start_time.elapsed().as_secs(),
        forwarded = state.stats.forwarded.load(Ordering::Relaxed),
        failed = state.stats.failed.load(Ordering::Relaxed),
        rejected = state.stats.rejected.load(Ordering::Relaxed),
        "portico stopped"
    );
    Ok(())
}
