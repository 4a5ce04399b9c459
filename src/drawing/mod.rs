//! SpreadsheetDrawing (`xdr`) graphic frame model and codec.
//!
//! This module provides the typed node hierarchy for the graphic frame
//! element family together with its decode and encode engines. The model
//! binds the fields it understands and carries everything else — unknown
//! attributes in per-element reservoirs, unknown child elements as
//! verbatim captures — so a decode/encode cycle reproduces the input.

pub mod frame;
pub mod graphic;
pub mod ns;
pub mod raw;
pub mod reader;
pub mod reserved;
pub mod transform;
pub mod writer;

// Re-exports for convenience
pub use frame::{DrawingProperties, FrameNonVisual, FrameProperties, GraphicFrame};
pub use graphic::{ChartRef, GraphicPayload, GraphicalObject, GraphicalObjectData};
pub use raw::RawXml;
pub use reader::parse_graphic_frame;
pub use reserved::{ReservedAttr, ReservedAttributes};
pub use transform::{Point2D, Size2D, Transform2D};
pub use writer::{frame_to_string, write_frame};
