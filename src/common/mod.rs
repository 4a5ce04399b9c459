//! Common utilities shared across the codec.
//!
//! This module provides the scalar attribute codecs and XML text helpers
//! used by the drawing fragment reader and writer.

// Submodule declarations
pub mod scalar;
pub mod xml;

// Re-exports for convenience
pub use scalar::{format_i64, format_u32, format_u64, parse_i64, parse_u32, parse_u64};
pub use xml::{escape_xml, unescape_xml};
