//! 2-D placement for a graphic frame.
//!
//! The transform element (`xdr:xfrm`) carries an optional offset (`a:off`)
//! and an optional extent (`a:ext`), both measured in EMUs. Absence of the
//! whole transform means the placement is inherited from context.

use crate::drawing::raw::RawXml;
use crate::drawing::reserved::ReservedAttributes;
use phf::{Set, phf_set};

/// EMUs per inch.
pub const EMUS_PER_INCH: i64 = 914_400;
/// EMUs per centimeter.
pub const EMUS_PER_CM: i64 = 360_000;
/// EMUs per point.
pub const EMUS_PER_PT: i64 = 12_700;

/// Convert typographic points to EMUs.
#[inline]
pub fn pt_to_emu(pt: i64) -> i64 {
    pt.saturating_mul(EMUS_PER_PT)
}

/// Convert EMUs to typographic points, rounding to the nearest point.
#[inline]
pub fn emu_to_pt(emu: i64) -> i64 {
    (emu as f64 / EMUS_PER_PT as f64).round() as i64
}

/// Attributes of `a:off` bound to typed fields.
pub(crate) static OFFSET_MODELED_ATTRS: Set<&'static str> = phf_set! { "x", "y" };

/// Attributes of `a:ext` bound to typed fields.
pub(crate) static EXTENT_MODELED_ATTRS: Set<&'static str> = phf_set! { "cx", "cy" };

/// Signed 2-D position in EMUs (`a:off`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point2D {
    /// Horizontal position in EMUs
    pub x: i64,
    /// Vertical position in EMUs
    pub y: i64,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Unsigned 2-D extent in EMUs (`a:ext`).
///
/// Fields are stored under their wire names; `cx` is the extent along the
/// x axis (width) and `cy` along the y axis (height).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size2D {
    /// Extent along x in EMUs
    pub cx: u64,
    /// Extent along y in EMUs
    pub cy: u64,
}

impl Size2D {
    /// Create a new extent.
    #[inline]
    pub fn new(cx: u64, cy: u64) -> Self {
        Self { cx, cy }
    }

    /// Width of the frame in EMUs.
    #[inline]
    pub fn width(&self) -> u64 {
        self.cx
    }

    /// Height of the frame in EMUs.
    #[inline]
    pub fn height(&self) -> u64 {
        self.cy
    }
}

/// 2-D transform of a graphic frame (`xdr:xfrm`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transform2D {
    /// Position of the frame (`a:off`)
    pub offset: Option<Point2D>,
    /// Extent of the frame (`a:ext`)
    pub size: Option<Size2D>,
    /// Attributes on the transform element not bound above (`rot`,
    /// `flipH`, `flipV` and anything newer)
    pub reserved: ReservedAttributes,
    /// Unrecognized child elements, retained verbatim
    pub unrecognized: Vec<RawXml>,
}

impl Transform2D {
    /// Create an empty transform.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the offset.
    #[inline]
    pub fn with_offset(mut self, offset: Point2D) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the extent.
    #[inline]
    pub fn with_size(mut self, size: Size2D) -> Self {
        self.size = Some(size);
        self
    }
}
