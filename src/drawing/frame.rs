//! The graphic frame element family (`xdr:graphicFrame`).
//!
//! A graphic frame is the spreadsheet drawing container for non-shape
//! content such as charts: a non-visual bookkeeping block, an optional
//! 2-D transform, and an optional graphical payload. Every element in the
//! family keeps a reservoir of the attributes it does not bind and retains
//! unrecognized child elements verbatim, so decoding and re-encoding a
//! fragment never drops information the producing schema considered valid.

use crate::drawing::graphic::{ChartRef, GraphicalObject};
use crate::drawing::raw::RawXml;
use crate::drawing::reserved::ReservedAttributes;
use crate::drawing::transform::{Point2D, Size2D, Transform2D};
use crate::drawing::{reader, writer};
use crate::error::Result;
use phf::{Set, phf_set};

/// Attributes of `xdr:cNvPr` bound to typed fields.
pub(crate) static CNVPR_MODELED_ATTRS: Set<&'static str> = phf_set! { "id", "name" };

/// Non-visual drawing properties (`xdr:cNvPr`): identity of the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingProperties {
    /// Drawing object id, unique within a document. Uniqueness is a
    /// caller contract, not enforced here.
    pub id: u32,
    /// Display name, free-form text
    pub name: String,
    /// Attributes not bound above (`hidden`, `title`, `descr`, ...)
    pub reserved: ReservedAttributes,
    /// Unrecognized child elements, retained verbatim
    pub unrecognized: Vec<RawXml>,
}

impl DrawingProperties {
    /// Create drawing properties with the two required fields.
    #[inline]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            reserved: ReservedAttributes::new(),
            unrecognized: Vec::new(),
        }
    }
}

/// Non-visual graphic frame properties (`xdr:cNvGraphicFramePr`).
///
/// An opaque block reserved for frame-level flags; everything observed on
/// it is carried through the reservoir or verbatim capture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameProperties {
    /// Attributes on the element, none are bound
    pub reserved: ReservedAttributes,
    /// Child elements such as `a:graphicFrameLocks`, retained verbatim
    pub unrecognized: Vec<RawXml>,
}

impl FrameProperties {
    /// Create an empty properties block.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

/// The non-visual block of a graphic frame (`xdr:nvGraphicFramePr`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameNonVisual {
    /// Identity of the frame (`xdr:cNvPr`), required
    pub drawing_properties: DrawingProperties,
    /// Frame property block (`xdr:cNvGraphicFramePr`); omitted on encode
    /// when the source omitted it
    pub frame_properties: Option<FrameProperties>,
    /// Attributes on the block element, none are bound
    pub reserved: ReservedAttributes,
    /// Unrecognized child elements, retained verbatim
    pub unrecognized: Vec<RawXml>,
}

impl FrameNonVisual {
    /// Create a non-visual block with the required identity fields.
    #[inline]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            drawing_properties: DrawingProperties::new(id, name),
            frame_properties: Some(FrameProperties::new()),
            reserved: ReservedAttributes::new(),
            unrecognized: Vec::new(),
        }
    }
}

/// A spreadsheet drawing graphic frame (`xdr:graphicFrame`).
///
/// Decode with [`GraphicFrame::from_xml`], inspect or edit the typed
/// fields, then re-serialize with [`GraphicFrame::to_xml`]; anything the
/// model does not bind rides along unchanged. A frame with neither
/// transform nor graphic payload is a valid bare placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicFrame {
    /// Identity and bookkeeping, required
    pub non_visual: FrameNonVisual,
    /// 2-D placement; absence means inherit from context
    pub transform: Option<Transform2D>,
    /// Graphical payload wrapper
    pub graphic: Option<GraphicalObject>,
    /// Attributes on the frame element not bound to any field
    /// (`macro`, `fPublished`, ...)
    pub reserved: ReservedAttributes,
    /// Unrecognized child elements, retained verbatim and re-emitted
    /// after the modeled children
    pub unrecognized: Vec<RawXml>,
}

impl GraphicFrame {
    /// Create a bare frame with the required identity fields.
    #[inline]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            non_visual: FrameNonVisual::new(id, name),
            transform: None,
            graphic: None,
            reserved: ReservedAttributes::new(),
            unrecognized: Vec::new(),
        }
    }

    /// Set the 2-D transform.
    #[inline]
    pub fn with_transform(mut self, transform: Transform2D) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Attach a chart reference payload.
    #[inline]
    pub fn with_chart(mut self, r_id: impl Into<String>) -> Self {
        self.graphic = Some(GraphicalObject::chart(r_id));
        self
    }

    /// Decode the first graphic frame found in an XML fragment.
    ///
    /// The fragment may be the frame element itself or any wrapper that
    /// contains one (a drawing part root, an anchor element).
    pub fn from_xml(xml: &str) -> Result<Self> {
        reader::parse_graphic_frame(xml.as_bytes())
    }

    /// Serialize the frame back to XML.
    pub fn to_xml(&self) -> Result<String> {
        writer::frame_to_string(self)
    }

    /// Drawing object id.
    #[inline]
    pub fn id(&self) -> u32 {
        self.non_visual.drawing_properties.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.non_visual.drawing_properties.name
    }

    /// Placement offset, when a transform carries one.
    #[inline]
    pub fn offset(&self) -> Option<Point2D> {
        self.transform.as_ref()?.offset
    }

    /// Placement extent, when a transform carries one.
    #[inline]
    pub fn size(&self) -> Option<Size2D> {
        self.transform.as_ref()?.size
    }

    /// The chart reference, when the payload is a chart.
    #[inline]
    pub fn chart_ref(&self) -> Option<&ChartRef> {
        self.graphic.as_ref()?.chart_ref()
    }

    /// Relationship id of the chart payload, when present.
    #[inline]
    pub fn chart_relationship_id(&self) -> Option<&str> {
        self.chart_ref().map(ChartRef::relationship_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::reserved::ReservedAttr;

    #[test]
    fn test_bare_placeholder_is_valid() {
        let frame = GraphicFrame::new(1, "Placeholder");
        assert_eq!(frame.id(), 1);
        assert_eq!(frame.name(), "Placeholder");
        assert!(frame.transform.is_none());
        assert!(frame.graphic.is_none());
        assert!(frame.chart_relationship_id().is_none());
    }

    #[test]
    fn test_builder_chain() {
        let frame = GraphicFrame::new(2, "Chart 1")
            .with_transform(
                Transform2D::new()
                    .with_offset(Point2D::new(1, 2))
                    .with_size(Size2D::new(3, 4)),
            )
            .with_chart("rId1");

        assert_eq!(frame.offset(), Some(Point2D::new(1, 2)));
        assert_eq!(frame.size(), Some(Size2D::new(3, 4)));
        assert_eq!(frame.chart_relationship_id(), Some("rId1"));
    }

    #[test]
    fn test_structural_equality() {
        let mut a = GraphicFrame::new(2, "Chart 1").with_chart("rId1");
        let b = GraphicFrame::new(2, "Chart 1").with_chart("rId1");
        assert_eq!(a, b);

        a.reserved.push(ReservedAttr::new("macro", ""));
        assert_ne!(a, b);
    }
}
