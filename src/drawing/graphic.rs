//! Graphical object container and its polymorphic payload.
//!
//! `a:graphic` wraps a single `a:graphicData` element whose `uri` attribute
//! declares the kind of content inside. The chart kind is modeled as a
//! typed relationship reference; every other kind (including a missing
//! `uri`) is carried through verbatim so unknown payloads survive a
//! read/write cycle untouched.

use crate::drawing::ns;
use crate::drawing::raw::RawXml;
use crate::drawing::reserved::ReservedAttributes;
use phf::{Set, phf_set};

/// Attributes of `a:graphicData` bound to typed fields.
pub(crate) static GRAPHIC_DATA_MODELED_ATTRS: Set<&'static str> = phf_set! { "uri" };

/// A chart reference (`c:chart`), pointing at a chart part through a
/// relationship id.
///
/// Resolution of the id to an actual part is the package layer's concern;
/// this model only stores and round-trips the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRef {
    /// Relationship id (`r:id`), e.g. "rId1"
    pub r_id: String,
    /// Attributes on the chart element not bound above
    pub reserved: ReservedAttributes,
    /// Unrecognized child elements, retained verbatim
    pub unrecognized: Vec<RawXml>,
}

impl ChartRef {
    /// Create a chart reference.
    #[inline]
    pub fn new(r_id: impl Into<String>) -> Self {
        Self {
            r_id: r_id.into(),
            reserved: ReservedAttributes::new(),
            unrecognized: Vec::new(),
        }
    }

    /// The relationship id.
    #[inline]
    pub fn relationship_id(&self) -> &str {
        &self.r_id
    }
}

/// Content of a graphic data container, selected once per decode by the
/// `uri` discriminant.
///
/// New recognized kinds are added as new arms; unknown kinds always take
/// the verbatim fallback rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicPayload {
    /// A chart reference; `uri` equals the chart schema namespace
    Chart(ChartRef),
    /// Any other payload, preserved byte-for-byte including namespace
    /// declarations local to the sub-tree
    Unrecognized(RawXml),
}

/// The `a:graphicData` element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphicalObjectData {
    /// Payload kind discriminant, round-tripped verbatim
    pub uri: Option<String>,
    /// The payload itself; `None` for an empty container
    pub payload: Option<GraphicPayload>,
    /// Attributes not bound above
    pub reserved: ReservedAttributes,
    /// Unrecognized child elements, retained verbatim
    pub unrecognized: Vec<RawXml>,
}

impl GraphicalObjectData {
    /// Create a chart data container.
    #[inline]
    pub fn chart(r_id: impl Into<String>) -> Self {
        Self {
            uri: Some(ns::CHART.to_string()),
            payload: Some(GraphicPayload::Chart(ChartRef::new(r_id))),
            reserved: ReservedAttributes::new(),
            unrecognized: Vec::new(),
        }
    }
}

/// The `a:graphic` wrapper element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphicalObject {
    /// The single graphic data child
    pub data: Option<GraphicalObjectData>,
    /// Attributes not bound above
    pub reserved: ReservedAttributes,
    /// Unrecognized child elements, retained verbatim
    pub unrecognized: Vec<RawXml>,
}

impl GraphicalObject {
    /// Create an empty graphic wrapper.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graphic wrapper holding a chart reference.
    #[inline]
    pub fn chart(r_id: impl Into<String>) -> Self {
        Self {
            data: Some(GraphicalObjectData::chart(r_id)),
            reserved: ReservedAttributes::new(),
            unrecognized: Vec::new(),
        }
    }

    /// The chart reference, when the payload is a chart.
    #[inline]
    pub fn chart_ref(&self) -> Option<&ChartRef> {
        match self.data.as_ref()?.payload.as_ref()? {
            GraphicPayload::Chart(chart) => Some(chart),
            GraphicPayload::Unrecognized(_) => None,
        }
    }
}
