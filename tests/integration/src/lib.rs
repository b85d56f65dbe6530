//! End-to-end tests for Tailseal
//!
//! This test suite validates:
//! - Signing and verifying documents on disk with both framing schemes
//! - Tamper, wrong-key and truncation failure modes
//! - Multi-signature history on one document
//! - CBC and OFB chaining modes over the shipped block primitives
//! - Configuration-driven codec construction

pub mod test_utils;


#[cfg(test)]
mod chained_mode_tests;

#[cfg(test)]
mod config_driven_tests;
