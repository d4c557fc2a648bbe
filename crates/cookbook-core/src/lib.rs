//! Service plumbing shared by Cookbook binaries: error envelope,
//! request ids, tracing setup and env-driven configuration.

pub mod config;
pub mod error;
pub mod middleware;
pub mod serde;
pub mod tracing;
