//! Utility functions for identifier generation and destination handling.
//!
//! - [`code_generator`] - Short identifier generation and shape checks
//! - [`url_normalizer`] - Destination normalization

pub mod code_generator;
pub mod url_normalizer;
