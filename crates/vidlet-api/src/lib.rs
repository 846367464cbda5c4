//! Vidlet API
//!
//! HTTP surface for the thumbnail upload pipeline. The library exposes the
//! route/state setup so integration tests can build the application the same
//! way the binary does.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
