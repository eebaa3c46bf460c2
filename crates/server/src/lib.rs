//! HTTP server for the Shopsight catalog query service.
//!
//! Exposed as a library so integration tests can build the router
//! in-process; the `shopsight` binary wraps this with config loading
//! and lifecycle handling.

pub mod api;
pub mod metrics;
pub mod state;
