//! # Craft Development Tools
//!
//! Command-line tools for recipe data:
//! - Recipe file validation
//! - Item listing
//! - Plan calculation with text or JSON output

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod calc;
pub mod validate;
