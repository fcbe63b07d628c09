//! Web front-end for the Consulta appointment API.
//!
//! The gateway renders HTML forms and tables for appointment ("consulta")
//! records and forwards every create, list, update and delete operation to a
//! separate backend API. It holds no state of its own:
//!
//! ```text
//! Browser ──form──▶ Gateway ──JSON──▶ Consulta API
//!    ▲                 │
//!    └──HTML/redirect──┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`consulta`]: Record types, API client and lookup
//! - [`web`]: Browser-facing routes, handlers and templates
//! - [`metrics`]: Prometheus metrics for outbound calls
//! - [`utils`]: Utility functions

pub mod config;
pub mod consulta;
pub mod error;
pub mod metrics;
pub mod utils;
pub mod web;

pub use config::Config;
pub use error::{ApiError, GatewayError, Result};
