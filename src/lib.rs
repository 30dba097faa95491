//! Portico is an API gateway for internal HTTP microservices.
//!
//! It exposes the auth, product, order, and payment services through a
//! single public endpoint. Inbound requests are matched against a fixed
//! set of route shapes, optionally authenticated by validating a bearer
//! JWT, and forwarded to the resolved downstream over a shared pooled
//! connection. The downstream response is relayed back verbatim.
//!
//! # Architecture
//!
//! - [`auth`] -- Bearer token validation and claim-to-header translation.
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, health).
//! - [`config`] -- Gateway configuration: JWT settings and one base URL
//!   per downstream service, validated at startup.
//! - [`error`] -- Unified error types using `thiserror`, mapped to HTTP
//!   status codes at the gateway boundary.
//! - [`health`] -- `GET /health` endpoint handler, answered locally.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`proxy`] -- Core pipeline: route resolution, the auth gate, outbound
//!   header construction, and downstream forwarding.
//! - [`server`] -- Axum server setup, shared application state, HTTP client,
//!   and graceful shutdown.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod auth;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod proxy;
pub mod server;
