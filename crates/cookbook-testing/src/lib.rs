//! Test utilities for Cookbook services.
//!
//! Import from `[dev-dependencies]` only.

pub mod auth;
