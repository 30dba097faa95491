//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, health), and their associated argument structs.
//! Every flag has an environment variable equivalent for container
//! deployments.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "portico",
    version,
    about = "API gateway for internal HTTP microservices",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        portico run                          Start with default service URLs\n  \
        portico run -p 8080 --pretty         Local dev mode\n  \
        portico health                       Probe a running instance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway server
    Run(Box<RunArgs>),

    /// Check health of a running instance
    Health(HealthArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        portico run                                          Default bind on 0.0.0.0:8000\n  \
        portico run --orders-url http://localhost:8003       Override one downstream\n  \
        portico run --jwt-secret s3cret --debug --pretty     Local dev mode")]
pub struct RunArgs {
    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // -- Authentication --
    /// Shared secret for bearer token verification (HS256)
    #[arg(
        long,
        env = "JWT_SECRET",
        default_value = "jwt_secret",
        hide_env_values = true,
        help_heading = "Authentication"
    )]
    pub jwt_secret: String,

    /// Token time-to-live in seconds, measured from the issued-at claim
    #[arg(
        long,
        env = "JWT_TTL_SECS",
        default_value_t = 604_800,
        help_heading = "Authentication"
    )]
    pub jwt_ttl: u64,

    // -- Downstream Services --
    /// Base URL of the auth service
    #[arg(
        long,
        env = "AUTH_SERVICE_URL",
        default_value = "http://auth-service:8000",
        help_heading = "Downstream Services"
    )]
    pub auth_url: String,

    /// Base URL of the product service
    #[arg(
        long,
        env = "PRODUCT_SERVICE_URL",
        default_value = "http://product-service:8000",
        help_heading = "Downstream Services"
    )]
    pub products_url: String,

    /// Base URL of the order service
    #[arg(
        long,
        env = "ORDER_SERVICE_URL",
        default_value = "http://order-service:8000",
        help_heading = "Downstream Services"
    )]
    pub orders_url: String,

    /// Base URL of the payment service
    #[arg(
        long,
        env = "PAYMENT_SERVICE_URL",
        default_value = "http://payment-service:8000",
        help_heading = "Downstream Services"
    )]
    pub payments_url: String,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Debug mode (lowers the default log level to debug)
    #[arg(long, env = "DEBUG")]
    pub debug: bool,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Tuning --
    /// Total timeout per downstream request, in seconds
    #[arg(
        long,
        env = "REQUEST_TIMEOUT_SECS",
        default_value_t = 10,
        help_heading = "Tuning"
    )]
    pub timeout: u64,

    /// Max request body size in bytes
    #[arg(
        long,
        env = "MAX_BODY_SIZE",
        default_value_t = 10_485_760,
        help_heading = "Tuning"
    )]
    pub max_body: usize,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:8000")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}
