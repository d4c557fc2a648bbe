//! Auth types shared across Cookbook crates.
//!
//! Provides JWT issuing/validation and the bearer-token `Identity` extractor.

pub mod identity;
pub mod token;
