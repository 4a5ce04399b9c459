//! xdrml - A Rust library for SpreadsheetML drawing fragments
//!
//! This library provides a typed document model and a round-trip codec for
//! the DrawingML graphic frame family embedded in spreadsheet drawing
//! parts (`xdr:graphicFrame` and its descendants).
//!
//! # Features
//!
//! - **Typed model**: frame identity, 2-D transform, and chart payload as
//!   strongly-typed nodes with namespace-qualified identity
//! - **Round-trip fidelity**: attributes and elements the model does not
//!   bind are preserved verbatim and re-emitted unchanged
//! - **Exact numerics**: EMU coordinates and identifiers round-trip
//!   without any textual drift
//! - **Open payloads**: unknown graphic data kinds are carried through
//!   byte-for-byte instead of being rejected
//!
//! # Example - Decoding and re-encoding a fragment
//!
//! ```
//! use xdrml::drawing::GraphicFrame;
//!
//! # fn main() -> xdrml::Result<()> {
//! let fragment = concat!(
//!     r#"<xdr:graphicFrame macro="">"#,
//!     r#"<xdr:nvGraphicFramePr>"#,
//!     r#"<xdr:cNvPr id="2" name="Chart 1"/>"#,
//!     r#"<xdr:cNvGraphicFramePr/>"#,
//!     r#"</xdr:nvGraphicFramePr>"#,
//!     r#"<xdr:xfrm><a:off x="1" y="2"/><a:ext cx="3" cy="4"/></xdr:xfrm>"#,
//!     r#"<a:graphic>"#,
//!     r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">"#,
//!     r#"<c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart""#,
//!     r#" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#,
//!     r#" r:id="rId1"/>"#,
//!     r#"</a:graphicData>"#,
//!     r#"</a:graphic>"#,
//!     r#"</xdr:graphicFrame>"#
//! );
//!
//! let frame = GraphicFrame::from_xml(fragment)?;
//! assert_eq!(frame.id(), 2);
//! assert_eq!(frame.name(), "Chart 1");
//! assert_eq!(frame.chart_relationship_id(), Some("rId1"));
//!
//! // Unknown attributes ride along and come back out unchanged.
//! assert_eq!(frame.reserved.get("macro"), Some(""));
//! assert_eq!(frame.to_xml()?, fragment);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Building a frame in memory
//!
//! ```
//! use xdrml::drawing::{GraphicFrame, Point2D, Size2D, Transform2D};
//!
//! # fn main() -> xdrml::Result<()> {
//! let frame = GraphicFrame::new(2, "Chart 1")
//!     .with_transform(
//!         Transform2D::new()
//!             .with_offset(Point2D::new(0, 0))
//!             .with_size(Size2D::new(914_400, 914_400)),
//!     )
//!     .with_chart("rId1");
//!
//! let xml = frame.to_xml()?;
//! assert!(xml.starts_with("<xdr:graphicFrame>"));
//! # Ok(())
//! # }
//! ```

/// Shared scalar codecs and XML text helpers
pub mod common;

/// The graphic frame model and its decode/encode engines
pub mod drawing;

/// Error types
pub mod error;

// Re-export commonly used types for convenience
pub use error::{DrawingError, Result};
