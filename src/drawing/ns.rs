//! Namespace URIs for the spreadsheet drawing element family.
//!
//! Element and attribute identity is keyed by namespace URI plus local
//! name, never local name alone. Prefixes are a serialization cosmetic;
//! the writer always emits the conventional `xdr`/`a`/`c`/`r` spellings.

/// SpreadsheetDrawing namespace (`xdr`), the frame container schema.
pub const SPREADSHEET_DRAWING: &str =
    "http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing";

/// DrawingML main namespace (`a`), transform/offset/extent elements.
pub const DRAWING_MAIN: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

/// DrawingML chart namespace (`c`), the chart reference element. Doubles
/// as the `uri` discriminant value that selects the chart payload.
pub const CHART: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

/// Relationships namespace (`r`), qualifying relationship-id attributes.
pub const RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Resolve a conventional prefix to its namespace URI.
///
/// Fragments extracted from a drawing part often travel without the
/// namespace declarations of their enclosing document; the decoder falls
/// back to the conventional prefix table for such input.
pub(crate) fn conventional_prefix_ns(prefix: &[u8]) -> Option<&'static str> {
    match prefix {
        b"xdr" => Some(SPREADSHEET_DRAWING),
        b"a" => Some(DRAWING_MAIN),
        b"c" => Some(CHART),
        b"r" => Some(RELATIONSHIPS),
        _ => None,
    }
}
