//! Configuration module.
//!
//! This module contains configuration types, environment loading, and
//! constants.

pub mod constants;
mod env;
mod types;

// Re-export public API
pub use constants::*;
pub use types::{AdvisoryConfig, Config, GoogleConfig, IndexNowConfig, LogFormat, LogLevel};
