//! # Craft Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Recipe book fixtures (reference, cyclic, deep chains)
//! - Tolerance-based assertions for plan amounts
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assertions;
pub mod fixtures;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
