//! Core functionality for Tailseal.
//!
//! This crate provides the configuration, logging and error plumbing shared
//! by the Tailseal crates.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{
    Config, LogFormat, LoggingConfig, PrimitiveSuite, SchemeKind, SignerConfig, KEY_HEX_LEN,
    MAX_AUTHOR_ID_LEN,
};
pub use error::{CoreError, CoreResult};
