// ABOUTME: Library root for redeploy-operator - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod devops;
pub mod diagnostics;
pub mod error;
pub mod metrics;
pub mod notify;
pub mod redeploy;
pub mod schedule;
pub mod server;
pub mod types;
