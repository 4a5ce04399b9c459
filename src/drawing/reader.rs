//! Decode engine for graphic frame fragments.
//!
//! A single forward pass over a namespace-resolved token stream builds the
//! typed tree bottom-up: modeled attributes are bound through the static
//! per-element tables, everything else on an opening tag is routed to that
//! element's reservoir, and unknown child elements are captured verbatim
//! by byte span. Dispatch is keyed by namespace URI plus local name.
//! Fragments that travel without namespace declarations are accepted by
//! falling back to the conventional `xdr`/`a`/`c`/`r` prefix table.
//!
//! Insignificant whitespace and comments between elements are not
//! preserved; everything inside a captured sub-tree is.

use crate::common::scalar::{parse_i64, parse_u32, parse_u64};
use crate::common::xml::unescape_xml;
use crate::drawing::frame::{
    CNVPR_MODELED_ATTRS, DrawingProperties, FrameNonVisual, FrameProperties, GraphicFrame,
};
use crate::drawing::graphic::{
    ChartRef, GRAPHIC_DATA_MODELED_ATTRS, GraphicPayload, GraphicalObject, GraphicalObjectData,
};
use crate::drawing::ns;
use crate::drawing::raw::RawXml;
use crate::drawing::reserved::{ReservedAttr, ReservedAttributes};
use crate::drawing::transform::{
    EXTENT_MODELED_ATTRS, OFFSET_MODELED_ATTRS, Point2D, Size2D, Transform2D,
};
use crate::error::{DrawingError, Result};
use quick_xml::NsReader;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{QName, ResolveResult};

/// Decode the first graphic frame found in the input.
///
/// The input may be the frame element itself or any document that
/// contains one; everything outside the frame is ignored.
pub fn parse_graphic_frame(input: &[u8]) -> Result<GraphicFrame> {
    let mut reader = NsReader::from_reader(input);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                if element_matches(&reader, e.name(), ns::SPREADSHEET_DRAWING, b"graphicFrame") {
                    return parse_frame(&mut reader, input, e, false);
                }
            },
            Event::Empty(ref e) => {
                if element_matches(&reader, e.name(), ns::SPREADSHEET_DRAWING, b"graphicFrame") {
                    return parse_frame(&mut reader, input, e, true);
                }
            },
            Event::Eof => {
                return Err(DrawingError::UnexpectedElement(
                    "no graphicFrame element in input".to_string(),
                ));
            },
            _ => {},
        }
    }
}

fn parse_frame(
    reader: &mut NsReader<&[u8]>,
    input: &[u8],
    e: &BytesStart,
    empty: bool,
) -> Result<GraphicFrame> {
    // graphicFrame binds no attributes itself; macro, fPublished and
    // anything newer all ride in the reservoir.
    let mut reserved = ReservedAttributes::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| DrawingError::Xml(err.to_string()))?;
        if is_xmlns(attr.key) {
            continue;
        }
        reserved.push(reserve_attr(reader, &attr)?);
    }

    let mut non_visual: Option<FrameNonVisual> = None;
    let mut transform: Option<Transform2D> = None;
    let mut graphic: Option<GraphicalObject> = None;
    let mut unrecognized = Vec::new();

    if !empty {
        loop {
            let pos = reader.buffer_position() as usize;
            let (child, child_empty) = match reader.read_event()? {
                Event::Start(c) => (c, false),
                Event::Empty(c) => (c, true),
                Event::End(_) => break,
                Event::Eof => return Err(unexpected_eof()),
                _ => continue,
            };

            if element_matches(reader, child.name(), ns::SPREADSHEET_DRAWING, b"nvGraphicFramePr")
            {
                require_absent(&non_visual, "xdr:nvGraphicFramePr")?;
                non_visual = Some(parse_non_visual(reader, input, &child, child_empty)?);
            } else if element_matches(reader, child.name(), ns::SPREADSHEET_DRAWING, b"xfrm") {
                require_absent(&transform, "xdr:xfrm")?;
                transform = Some(parse_transform(reader, input, &child, child_empty)?);
            } else if element_matches(reader, child.name(), ns::DRAWING_MAIN, b"graphic") {
                require_absent(&graphic, "a:graphic")?;
                graphic = Some(parse_graphic(reader, input, &child, child_empty)?);
            } else {
                unrecognized.push(capture_raw(reader, input, pos, &child, child_empty)?);
            }
        }
    }

    let non_visual = non_visual.ok_or_else(|| DrawingError::MissingRequiredField {
        element: "xdr:graphicFrame".to_string(),
        field: "xdr:nvGraphicFramePr".to_string(),
    })?;

    Ok(GraphicFrame {
        non_visual,
        transform,
        graphic,
        reserved,
        unrecognized,
    })
}

fn parse_non_visual(
    reader: &mut NsReader<&[u8]>,
    input: &[u8],
    e: &BytesStart,
    empty: bool,
) -> Result<FrameNonVisual> {
    let mut reserved = ReservedAttributes::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| DrawingError::Xml(err.to_string()))?;
        if is_xmlns(attr.key) {
            continue;
        }
        reserved.push(reserve_attr(reader, &attr)?);
    }

    let mut drawing_properties: Option<DrawingProperties> = None;
    let mut frame_properties: Option<FrameProperties> = None;
    let mut unrecognized = Vec::new();

    if !empty {
        loop {
            let pos = reader.buffer_position() as usize;
            let (child, child_empty) = match reader.read_event()? {
                Event::Start(c) => (c, false),
                Event::Empty(c) => (c, true),
                Event::End(_) => break,
                Event::Eof => return Err(unexpected_eof()),
                _ => continue,
            };

            if element_matches(reader, child.name(), ns::SPREADSHEET_DRAWING, b"cNvPr") {
                require_absent(&drawing_properties, "xdr:cNvPr")?;
                drawing_properties =
                    Some(parse_drawing_properties(reader, input, &child, child_empty)?);
            } else if element_matches(
                reader,
                child.name(),
                ns::SPREADSHEET_DRAWING,
                b"cNvGraphicFramePr",
            ) {
                require_absent(&frame_properties, "xdr:cNvGraphicFramePr")?;
                frame_properties =
                    Some(parse_frame_properties(reader, input, &child, child_empty)?);
            } else {
                unrecognized.push(capture_raw(reader, input, pos, &child, child_empty)?);
            }
        }
    }

    let drawing_properties = drawing_properties.ok_or_else(|| {
        DrawingError::MissingRequiredField {
            element: "xdr:nvGraphicFramePr".to_string(),
            field: "xdr:cNvPr".to_string(),
        }
    })?;

    Ok(FrameNonVisual {
        drawing_properties,
        frame_properties,
        reserved,
        unrecognized,
    })
}

fn parse_drawing_properties(
    reader: &mut NsReader<&[u8]>,
    input: &[u8],
    e: &BytesStart,
    empty: bool,
) -> Result<DrawingProperties> {
    let mut id: Option<u32> = None;
    let mut name: Option<String> = None;
    let mut reserved = ReservedAttributes::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| DrawingError::Xml(err.to_string()))?;
        if is_xmlns(attr.key) {
            continue;
        }
        if is_modeled(&attr, &CNVPR_MODELED_ATTRS) {
            match attr.key.local_name().as_ref() {
                b"id" => id = Some(parse_u32("id", &attr.value)?),
                b"name" => name = Some(attr_text(&attr)?),
                _ => {},
            }
        } else {
            reserved.push(reserve_attr(reader, &attr)?);
        }
    }

    let mut unrecognized = Vec::new();
    if !empty {
        collect_unrecognized(reader, input, &mut unrecognized)?;
    }

    let id = id.ok_or_else(|| missing_attr("xdr:cNvPr", "id"))?;
    let name = name.ok_or_else(|| missing_attr("xdr:cNvPr", "name"))?;

    Ok(DrawingProperties {
        id,
        name,
        reserved,
        unrecognized,
    })
}

fn parse_frame_properties(
    reader: &mut NsReader<&[u8]>,
    input: &[u8],
    e: &BytesStart,
    empty: bool,
) -> Result<FrameProperties> {
    let mut reserved = ReservedAttributes::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| DrawingError::Xml(err.to_string()))?;
        if is_xmlns(attr.key) {
            continue;
        }
        reserved.push(reserve_attr(reader, &attr)?);
    }

    let mut unrecognized = Vec::new();
    if !empty {
        collect_unrecognized(reader, input, &mut unrecognized)?;
    }

    Ok(FrameProperties {
        reserved,
        unrecognized,
    })
}

fn parse_transform(
    reader: &mut NsReader<&[u8]>,
    input: &[u8],
    e: &BytesStart,
    empty: bool,
) -> Result<Transform2D> {
    let mut reserved = ReservedAttributes::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| DrawingError::Xml(err.to_string()))?;
        if is_xmlns(attr.key) {
            continue;
        }
        reserved.push(reserve_attr(reader, &attr)?);
    }

    let mut offset: Option<Point2D> = None;
    let mut size: Option<Size2D> = None;
    let mut unrecognized = Vec::new();

    if !empty {
        loop {
            let pos = reader.buffer_position() as usize;
            let (child, child_empty) = match reader.read_event()? {
                Event::Start(c) => (c, false),
                Event::Empty(c) => (c, true),
                Event::End(_) => break,
                Event::Eof => return Err(unexpected_eof()),
                _ => continue,
            };

            if element_matches(reader, child.name(), ns::DRAWING_MAIN, b"off") {
                require_absent(&offset, "a:off")?;
                offset = Some(parse_offset(&child)?);
                if !child_empty {
                    reader.read_to_end(child.name())?;
                }
            } else if element_matches(reader, child.name(), ns::DRAWING_MAIN, b"ext") {
                require_absent(&size, "a:ext")?;
                size = Some(parse_extent(&child)?);
                if !child_empty {
                    reader.read_to_end(child.name())?;
                }
            } else {
                unrecognized.push(capture_raw(reader, input, pos, &child, child_empty)?);
            }
        }
    }

    Ok(Transform2D {
        offset,
        size,
        reserved,
        unrecognized,
    })
}

fn parse_offset(e: &BytesStart) -> Result<Point2D> {
    let mut x: Option<i64> = None;
    let mut y: Option<i64> = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|err| DrawingError::Xml(err.to_string()))?;
        if is_modeled(&attr, &OFFSET_MODELED_ATTRS) {
            match attr.key.local_name().as_ref() {
                b"x" => x = Some(parse_i64("x", &attr.value)?),
                b"y" => y = Some(parse_i64("y", &attr.value)?),
                _ => {},
            }
        }
    }

    let x = x.ok_or_else(|| missing_attr("a:off", "x"))?;
    let y = y.ok_or_else(|| missing_attr("a:off", "y"))?;
    Ok(Point2D::new(x, y))
}

fn parse_extent(e: &BytesStart) -> Result<Size2D> {
    let mut cx: Option<u64> = None;
    let mut cy: Option<u64> = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|err| DrawingError::Xml(err.to_string()))?;
        if is_modeled(&attr, &EXTENT_MODELED_ATTRS) {
            match attr.key.local_name().as_ref() {
                b"cx" => cx = Some(parse_u64("cx", &attr.value)?),
                b"cy" => cy = Some(parse_u64("cy", &attr.value)?),
                _ => {},
            }
        }
    }

    let cx = cx.ok_or_else(|| missing_attr("a:ext", "cx"))?;
    let cy = cy.ok_or_else(|| missing_attr("a:ext", "cy"))?;
    Ok(Size2D::new(cx, cy))
}

fn parse_graphic(
    reader: &mut NsReader<&[u8]>,
    input: &[u8],
    e: &BytesStart,
    empty: bool,
) -> Result<GraphicalObject> {
    let mut reserved = ReservedAttributes::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| DrawingError::Xml(err.to_string()))?;
        if is_xmlns(attr.key) {
            continue;
        }
        reserved.push(reserve_attr(reader, &attr)?);
    }

    let mut data: Option<GraphicalObjectData> = None;
    let mut unrecognized = Vec::new();

    if !empty {
        loop {
            let pos = reader.buffer_position() as usize;
            let (child, child_empty) = match reader.read_event()? {
                Event::Start(c) => (c, false),
                Event::Empty(c) => (c, true),
                Event::End(_) => break,
                Event::Eof => return Err(unexpected_eof()),
                _ => continue,
            };

            if element_matches(reader, child.name(), ns::DRAWING_MAIN, b"graphicData") {
                require_absent(&data, "a:graphicData")?;
                data = Some(parse_graphic_data(reader, input, &child, child_empty)?);
            } else {
                unrecognized.push(capture_raw(reader, input, pos, &child, child_empty)?);
            }
        }
    }

    Ok(GraphicalObject {
        data,
        reserved,
        unrecognized,
    })
}

fn parse_graphic_data(
    reader: &mut NsReader<&[u8]>,
    input: &[u8],
    e: &BytesStart,
    empty: bool,
) -> Result<GraphicalObjectData> {
    let mut uri: Option<String> = None;
    let mut reserved = ReservedAttributes::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| DrawingError::Xml(err.to_string()))?;
        if is_xmlns(attr.key) {
            continue;
        }
        if is_modeled(&attr, &GRAPHIC_DATA_MODELED_ATTRS) {
            uri = Some(attr_text(&attr)?);
        } else {
            reserved.push(reserve_attr(reader, &attr)?);
        }
    }

    let mut payload: Option<GraphicPayload> = None;
    let mut unrecognized = Vec::new();

    if !empty {
        if uri.as_deref() == Some(ns::CHART) {
            loop {
                let pos = reader.buffer_position() as usize;
                let (child, child_empty) = match reader.read_event()? {
                    Event::Start(c) => (c, false),
                    Event::Empty(c) => (c, true),
                    Event::End(_) => break,
                    Event::Eof => return Err(unexpected_eof()),
                    _ => continue,
                };

                if element_matches(reader, child.name(), ns::CHART, b"chart") {
                    require_absent(&payload, "c:chart")?;
                    payload = Some(GraphicPayload::Chart(parse_chart_ref(
                        reader,
                        input,
                        &child,
                        child_empty,
                    )?));
                } else {
                    unrecognized.push(capture_raw(reader, input, pos, &child, child_empty)?);
                }
            }
        } else {
            // Unknown payload kind: keep the whole content verbatim,
            // namespace declarations included.
            let span = reader.read_to_end(e.name())?;
            let blob = &input[span.start as usize..span.end as usize];
            if !blob.trim_ascii().is_empty() {
                payload = Some(GraphicPayload::Unrecognized(RawXml::new(blob.to_vec())));
            }
        }
    }

    Ok(GraphicalObjectData {
        uri,
        payload,
        reserved,
        unrecognized,
    })
}

fn parse_chart_ref(
    reader: &mut NsReader<&[u8]>,
    input: &[u8],
    e: &BytesStart,
    empty: bool,
) -> Result<ChartRef> {
    let mut r_id: Option<String> = None;
    let mut reserved = ReservedAttributes::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| DrawingError::Xml(err.to_string()))?;
        if is_xmlns(attr.key) {
            continue;
        }
        if attribute_matches(reader, attr.key, ns::RELATIONSHIPS, b"id") {
            r_id = Some(attr_text(&attr)?);
        } else {
            reserved.push(reserve_attr(reader, &attr)?);
        }
    }

    let mut unrecognized = Vec::new();
    if !empty {
        collect_unrecognized(reader, input, &mut unrecognized)?;
    }

    let r_id = r_id.ok_or_else(|| missing_attr("c:chart", "r:id"))?;

    Ok(ChartRef {
        r_id,
        reserved,
        unrecognized,
    })
}

/// Consume the remaining children of the current element, capturing each
/// one verbatim.
fn collect_unrecognized(
    reader: &mut NsReader<&[u8]>,
    input: &[u8],
    unrecognized: &mut Vec<RawXml>,
) -> Result<()> {
    loop {
        let pos = reader.buffer_position() as usize;
        let (child, child_empty) = match reader.read_event()? {
            Event::Start(c) => (c, false),
            Event::Empty(c) => (c, true),
            Event::End(_) => return Ok(()),
            Event::Eof => return Err(unexpected_eof()),
            _ => continue,
        };
        unrecognized.push(capture_raw(reader, input, pos, &child, child_empty)?);
    }
}

/// Capture a whole element, start tag through end tag, as verbatim bytes.
fn capture_raw(
    reader: &mut NsReader<&[u8]>,
    input: &[u8],
    start_pos: usize,
    e: &BytesStart,
    empty: bool,
) -> Result<RawXml> {
    if !empty {
        reader.read_to_end(e.name())?;
    }
    let end_pos = reader.buffer_position() as usize;
    Ok(RawXml::new(input[start_pos..end_pos].trim_ascii_start().to_vec()))
}

/// Namespace-aware element identity check.
///
/// An element bound to a namespace must match the expected URI exactly.
/// A conventional prefix without a declaration in scope resolves through
/// the default prefix table; an element with no binding at all is assumed
/// to sit in the schema position it appears in, so that fragments
/// extracted from a part decode without their document's prefix table.
fn element_matches(
    reader: &NsReader<&[u8]>,
    name: QName,
    expected_ns: &str,
    expected_local: &[u8],
) -> bool {
    if name.local_name().as_ref() != expected_local {
        return false;
    }
    match reader.resolve_element(name).0 {
        ResolveResult::Bound(uri) => uri.as_ref() == expected_ns.as_bytes(),
        ResolveResult::Unknown(prefix) => {
            ns::conventional_prefix_ns(&prefix) == Some(expected_ns)
        },
        ResolveResult::Unbound => true,
    }
}

/// Namespace-aware attribute identity check. Unprefixed attributes have
/// no namespace, so an unbound attribute never matches a qualified name.
fn attribute_matches(
    reader: &NsReader<&[u8]>,
    key: QName,
    expected_ns: &str,
    expected_local: &[u8],
) -> bool {
    if key.local_name().as_ref() != expected_local {
        return false;
    }
    match reader.resolve_attribute(key).0 {
        ResolveResult::Bound(uri) => uri.as_ref() == expected_ns.as_bytes(),
        ResolveResult::Unknown(prefix) => {
            ns::conventional_prefix_ns(&prefix) == Some(expected_ns)
        },
        ResolveResult::Unbound => false,
    }
}

/// Whether an attribute is an unqualified name from the element's modeled
/// table. Prefixed attributes never bind to unqualified modeled names.
fn is_modeled(attr: &Attribute, table: &phf::Set<&'static str>) -> bool {
    attr.key.prefix().is_none()
        && table.contains(std::str::from_utf8(attr.key.local_name().as_ref()).unwrap_or_default())
}

/// Whether an attribute is a namespace declaration rather than data.
/// Declarations are not routed to reservoirs; the writer re-establishes
/// the conventional prefix table on encode.
fn is_xmlns(key: QName) -> bool {
    let k = key.as_ref();
    k == b"xmlns" || k.starts_with(b"xmlns:")
}

/// Build a reservoir entry: qualified name as written, resolved namespace
/// when one is in scope, unescaped value.
fn reserve_attr(reader: &NsReader<&[u8]>, attr: &Attribute) -> Result<ReservedAttr> {
    let name = std::str::from_utf8(attr.key.as_ref())
        .map_err(|err| DrawingError::Xml(err.to_string()))?
        .to_string();
    let namespace = match reader.resolve_attribute(attr.key).0 {
        ResolveResult::Bound(uri) => Some(String::from_utf8_lossy(uri.as_ref()).into_owned()),
        ResolveResult::Unknown(prefix) => {
            ns::conventional_prefix_ns(&prefix).map(str::to_string)
        },
        ResolveResult::Unbound => None,
    };
    let value = attr_text(attr)?;
    Ok(ReservedAttr {
        name,
        namespace,
        value,
    })
}

/// Unescaped UTF-8 text of an attribute value.
fn attr_text(attr: &Attribute) -> Result<String> {
    let raw = std::str::from_utf8(&attr.value).map_err(|err| DrawingError::Xml(err.to_string()))?;
    Ok(unescape_xml(raw).into_owned())
}

fn require_absent<T>(slot: &Option<T>, element: &str) -> Result<()> {
    if slot.is_some() {
        Err(DrawingError::DuplicateElement(element.to_string()))
    } else {
        Ok(())
    }
}

fn missing_attr(element: &str, field: &str) -> DrawingError {
    DrawingError::MissingRequiredField {
        element: element.to_string(),
        field: field.to_string(),
    }
}

fn unexpected_eof() -> DrawingError {
    DrawingError::Xml("unexpected end of input".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::ns;

    const WRAPPER_OPEN: &str = concat!(
        r#"<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing""#,
        r#" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">"#
    );
    const WRAPPER_CLOSE: &str = "</xdr:wsDr>";

    const CHART_FRAME: &str = concat!(
        r#"<xdr:graphicFrame macro="">"#,
        r#"<xdr:nvGraphicFramePr>"#,
        r#"<xdr:cNvPr id="2" name="Chart 1"/>"#,
        r#"<xdr:cNvGraphicFramePr/>"#,
        r#"</xdr:nvGraphicFramePr>"#,
        r#"<xdr:xfrm><a:off x="1" y="2"/><a:ext cx="3" cy="4"/></xdr:xfrm>"#,
        r#"<a:graphic>"#,
        r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">"#,
        r#"<c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart""#,
        r#" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#,
        r#" r:id="rId1"/>"#,
        r#"</a:graphicData>"#,
        r#"</a:graphic>"#,
        r#"</xdr:graphicFrame>"#
    );

    fn wrapped(fragment: &str) -> String {
        format!("{WRAPPER_OPEN}{fragment}{WRAPPER_CLOSE}")
    }

    #[test]
    fn test_decode_chart_frame() {
        let frame = parse_graphic_frame(wrapped(CHART_FRAME).as_bytes()).unwrap();

        assert_eq!(frame.id(), 2);
        assert_eq!(frame.name(), "Chart 1");
        assert_eq!(frame.offset(), Some(Point2D::new(1, 2)));
        assert_eq!(frame.size(), Some(Size2D::new(3, 4)));
        assert_eq!(frame.size().unwrap().width(), 3);
        assert_eq!(frame.size().unwrap().height(), 4);
        assert_eq!(frame.chart_relationship_id(), Some("rId1"));

        // The unmodeled macro attribute lands in the frame reservoir.
        assert_eq!(frame.reserved.get("macro"), Some(""));
        assert_eq!(frame.reserved.len(), 1);

        let data = frame.graphic.as_ref().unwrap().data.as_ref().unwrap();
        assert_eq!(data.uri.as_deref(), Some(ns::CHART));
    }

    #[test]
    fn test_decode_without_namespace_declarations() {
        // Fragments extracted from a part travel without their document's
        // prefix table; conventional prefixes still resolve.
        let frame = parse_graphic_frame(CHART_FRAME.as_bytes()).unwrap();
        assert_eq!(frame.id(), 2);
        assert_eq!(frame.chart_relationship_id(), Some("rId1"));
    }

    #[test]
    fn test_modeled_children_decode_in_any_order() {
        let shuffled = concat!(
            r#"<xdr:graphicFrame>"#,
            r#"<a:graphic><a:graphicData uri="urn:x"/></a:graphic>"#,
            r#"<xdr:xfrm><a:ext cx="30" cy="40"/><a:off x="-10" y="20"/></xdr:xfrm>"#,
            r#"<xdr:nvGraphicFramePr><xdr:cNvPr id="7" name="Late"/></xdr:nvGraphicFramePr>"#,
            r#"</xdr:graphicFrame>"#
        );
        let frame = parse_graphic_frame(wrapped(shuffled).as_bytes()).unwrap();
        assert_eq!(frame.id(), 7);
        assert_eq!(frame.name(), "Late");
        assert_eq!(frame.offset(), Some(Point2D::new(-10, 20)));
        assert_eq!(frame.size(), Some(Size2D::new(30, 40)));
        // cNvGraphicFramePr was absent from the source.
        assert!(frame.non_visual.frame_properties.is_none());
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let input = wrapped(concat!(
            r#"<xdr:graphicFrame><xdr:nvGraphicFramePr>"#,
            r#"<xdr:cNvPr name="Chart 1"/>"#,
            r#"</xdr:nvGraphicFramePr></xdr:graphicFrame>"#
        ));
        match parse_graphic_frame(input.as_bytes()) {
            Err(DrawingError::MissingRequiredField { element, field }) => {
                assert_eq!(element, "xdr:cNvPr");
                assert_eq!(field, "id");
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let input = wrapped(concat!(
            r#"<xdr:graphicFrame><xdr:nvGraphicFramePr>"#,
            r#"<xdr:cNvPr id="2"/>"#,
            r#"</xdr:nvGraphicFramePr></xdr:graphicFrame>"#
        ));
        assert!(matches!(
            parse_graphic_frame(input.as_bytes()),
            Err(DrawingError::MissingRequiredField { field, .. }) if field == "name"
        ));
    }

    #[test]
    fn test_missing_non_visual_block_is_an_error() {
        let input = wrapped(r#"<xdr:graphicFrame/>"#);
        assert!(matches!(
            parse_graphic_frame(input.as_bytes()),
            Err(DrawingError::MissingRequiredField { field, .. })
                if field == "xdr:nvGraphicFramePr"
        ));
    }

    #[test]
    fn test_duplicate_singular_child_rejected() {
        let input = wrapped(concat!(
            r#"<xdr:graphicFrame>"#,
            r#"<xdr:nvGraphicFramePr><xdr:cNvPr id="1" name="A"/></xdr:nvGraphicFramePr>"#,
            r#"<xdr:nvGraphicFramePr><xdr:cNvPr id="2" name="B"/></xdr:nvGraphicFramePr>"#,
            r#"</xdr:graphicFrame>"#
        ));
        assert!(matches!(
            parse_graphic_frame(input.as_bytes()),
            Err(DrawingError::DuplicateElement(e)) if e == "xdr:nvGraphicFramePr"
        ));
    }

    #[test]
    fn test_malformed_offset_rejected() {
        let input = wrapped(concat!(
            r#"<xdr:graphicFrame>"#,
            r#"<xdr:nvGraphicFramePr><xdr:cNvPr id="1" name="A"/></xdr:nvGraphicFramePr>"#,
            r#"<xdr:xfrm><a:off x="wide" y="2"/></xdr:xfrm>"#,
            r#"</xdr:graphicFrame>"#
        ));
        assert!(matches!(
            parse_graphic_frame(input.as_bytes()),
            Err(DrawingError::MalformedNumber { attr, .. }) if attr == "x"
        ));
    }

    #[test]
    fn test_negative_extent_rejected_as_range() {
        let input = wrapped(concat!(
            r#"<xdr:graphicFrame>"#,
            r#"<xdr:nvGraphicFramePr><xdr:cNvPr id="1" name="A"/></xdr:nvGraphicFramePr>"#,
            r#"<xdr:xfrm><a:ext cx="-3" cy="4"/></xdr:xfrm>"#,
            r#"</xdr:graphicFrame>"#
        ));
        assert!(matches!(
            parse_graphic_frame(input.as_bytes()),
            Err(DrawingError::InvalidRange { attr, .. }) if attr == "cx"
        ));
    }

    #[test]
    fn test_unknown_payload_kind_preserved() {
        let fragment = concat!(
            r#"<xdr:graphicFrame>"#,
            r#"<xdr:nvGraphicFramePr><xdr:cNvPr id="3" name="Diagram 1"/></xdr:nvGraphicFramePr>"#,
            r#"<a:graphic><a:graphicData uri="urn:example:diagram">"#,
            r#"<dgm:relIds xmlns:dgm="urn:example:diagram" a="1" b="2"/>"#,
            r#"</a:graphicData></a:graphic>"#,
            r#"</xdr:graphicFrame>"#
        );
        let frame = parse_graphic_frame(wrapped(fragment).as_bytes()).unwrap();

        assert!(frame.chart_ref().is_none());
        let data = frame.graphic.as_ref().unwrap().data.as_ref().unwrap();
        assert_eq!(data.uri.as_deref(), Some("urn:example:diagram"));
        match data.payload.as_ref().unwrap() {
            GraphicPayload::Unrecognized(raw) => {
                assert_eq!(
                    raw.as_str(),
                    Some(r#"<dgm:relIds xmlns:dgm="urn:example:diagram" a="1" b="2"/>"#)
                );
            },
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_chart_payload_requires_relationship_id() {
        let fragment = concat!(
            r#"<xdr:graphicFrame>"#,
            r#"<xdr:nvGraphicFramePr><xdr:cNvPr id="2" name="Chart 1"/></xdr:nvGraphicFramePr>"#,
            r#"<a:graphic>"#,
            r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">"#,
            r#"<c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart"/>"#,
            r#"</a:graphicData></a:graphic>"#,
            r#"</xdr:graphicFrame>"#
        );
        assert!(matches!(
            parse_graphic_frame(wrapped(fragment).as_bytes()),
            Err(DrawingError::MissingRequiredField { element, field })
                if element == "c:chart" && field == "r:id"
        ));
    }

    #[test]
    fn test_unknown_elements_and_attributes_preserved() {
        let fragment = concat!(
            r#"<xdr:graphicFrame macro="DoThing" fPublished="1">"#,
            r#"<xdr:nvGraphicFramePr>"#,
            r#"<xdr:cNvPr id="9" name="Frame 9" hidden="1"/>"#,
            r#"<xdr:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></xdr:cNvGraphicFramePr>"#,
            r#"</xdr:nvGraphicFramePr>"#,
            r#"<xdr:xfrm rot="60000"><a:off x="0" y="0"/><a:ext cx="1" cy="1"/></xdr:xfrm>"#,
            r#"<xdr:futureElement keep="me"/>"#,
            r#"</xdr:graphicFrame>"#
        );
        let frame = parse_graphic_frame(wrapped(fragment).as_bytes()).unwrap();

        // Frame-level reservoir keeps both attributes, in input order.
        let names: Vec<&str> = frame.reserved.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["macro", "fPublished"]);

        // Per-element reservoirs.
        assert_eq!(
            frame.non_visual.drawing_properties.reserved.get("hidden"),
            Some("1")
        );
        let xfrm = frame.transform.as_ref().unwrap();
        assert_eq!(xfrm.reserved.get("rot"), Some("60000"));

        // Unknown children are retained verbatim.
        let locks = &frame.non_visual.frame_properties.as_ref().unwrap().unrecognized;
        assert_eq!(locks[0].as_str(), Some(r#"<a:graphicFrameLocks noGrp="1"/>"#));
        assert_eq!(
            frame.unrecognized[0].as_str(),
            Some(r#"<xdr:futureElement keep="me"/>"#)
        );
    }

    #[test]
    fn test_escaped_attribute_values_unescaped() {
        let fragment = concat!(
            r#"<xdr:graphicFrame>"#,
            r#"<xdr:nvGraphicFramePr>"#,
            r#"<xdr:cNvPr id="4" name="P &amp; L &lt;2026&gt;"/>"#,
            r#"</xdr:nvGraphicFramePr>"#,
            r#"</xdr:graphicFrame>"#
        );
        let frame = parse_graphic_frame(wrapped(fragment).as_bytes()).unwrap();
        assert_eq!(frame.name(), "P & L <2026>");
    }

    #[test]
    fn test_no_frame_in_input() {
        let input = wrapped("<xdr:sp/>");
        assert!(matches!(
            parse_graphic_frame(input.as_bytes()),
            Err(DrawingError::UnexpectedElement(_))
        ));
    }

    #[test]
    fn test_local_name_collision_across_namespaces() {
        // An element named graphicFrame in a foreign namespace must not
        // be mistaken for the spreadsheet drawing one.
        let input = concat!(
            r#"<w:doc xmlns:w="urn:example:wordprocessing">"#,
            r#"<w:graphicFrame/>"#,
            r#"</w:doc>"#
        );
        assert!(matches!(
            parse_graphic_frame(input.as_bytes()),
            Err(DrawingError::UnexpectedElement(_))
        ));
    }
}
