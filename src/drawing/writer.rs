//! Encode engine for graphic frame fragments.
//!
//! A single forward pass over the typed tree. Modeled children are always
//! emitted in schema order (non-visual block, transform, graphic payload)
//! regardless of the order they were decoded in; attributes are emitted as
//! modeled fields first, then reservoir entries in insertion order; raw
//! captures are written back byte-for-byte. Childless elements are
//! self-closing.
//!
//! Namespace prefixes are a cosmetic concern of this pass. The writer
//! emits the conventional `xdr`/`a` prefixes and expects the enclosing
//! document to declare them, as drawing parts do on their root; the
//! chart reference declares `c` and `r` locally, which is how producers
//! commonly write it.

use crate::common::scalar::{format_i64, format_u32, format_u64};
use crate::common::xml::escape_xml;
use crate::drawing::frame::{DrawingProperties, FrameNonVisual, FrameProperties, GraphicFrame};
use crate::drawing::graphic::{ChartRef, GraphicPayload, GraphicalObject, GraphicalObjectData};
use crate::drawing::ns;
use crate::drawing::raw::RawXml;
use crate::drawing::reserved::ReservedAttributes;
use crate::drawing::transform::Transform2D;
use crate::error::{DrawingError, Result};
use std::io::Write;

/// Serialize a graphic frame to a writer.
pub fn write_frame<W: Write>(writer: &mut W, frame: &GraphicFrame) -> Result<()> {
    write!(writer, "<xdr:graphicFrame")?;
    write_reserved(writer, &frame.reserved)?;
    write!(writer, ">")?;

    write_non_visual(writer, &frame.non_visual)?;
    if let Some(ref transform) = frame.transform {
        write_transform(writer, transform)?;
    }
    if let Some(ref graphic) = frame.graphic {
        write_graphic(writer, graphic)?;
    }
    write_raw(writer, &frame.unrecognized)?;

    write!(writer, "</xdr:graphicFrame>")?;
    Ok(())
}

/// Serialize a graphic frame to a string.
pub fn frame_to_string(frame: &GraphicFrame) -> Result<String> {
    let mut out = Vec::new();
    write_frame(&mut out, frame)?;
    String::from_utf8(out).map_err(|err| DrawingError::Xml(err.to_string()))
}

fn write_non_visual<W: Write>(writer: &mut W, non_visual: &FrameNonVisual) -> Result<()> {
    write!(writer, "<xdr:nvGraphicFramePr")?;
    write_reserved(writer, &non_visual.reserved)?;
    write!(writer, ">")?;

    write_drawing_properties(writer, &non_visual.drawing_properties)?;
    if let Some(ref frame_properties) = non_visual.frame_properties {
        write_frame_properties(writer, frame_properties)?;
    }
    write_raw(writer, &non_visual.unrecognized)?;

    write!(writer, "</xdr:nvGraphicFramePr>")?;
    Ok(())
}

fn write_drawing_properties<W: Write>(writer: &mut W, props: &DrawingProperties) -> Result<()> {
    write!(
        writer,
        r#"<xdr:cNvPr id="{}" name="{}""#,
        format_u32(props.id),
        escape_xml(&props.name)
    )?;
    write_reserved(writer, &props.reserved)?;
    close_element(writer, "xdr:cNvPr", &props.unrecognized)
}

fn write_frame_properties<W: Write>(writer: &mut W, props: &FrameProperties) -> Result<()> {
    write!(writer, "<xdr:cNvGraphicFramePr")?;
    write_reserved(writer, &props.reserved)?;
    close_element(writer, "xdr:cNvGraphicFramePr", &props.unrecognized)
}

fn write_transform<W: Write>(writer: &mut W, transform: &Transform2D) -> Result<()> {
    write!(writer, "<xdr:xfrm")?;
    write_reserved(writer, &transform.reserved)?;

    if transform.offset.is_none() && transform.size.is_none() && transform.unrecognized.is_empty()
    {
        write!(writer, "/>")?;
        return Ok(());
    }
    write!(writer, ">")?;

    if let Some(offset) = transform.offset {
        write!(
            writer,
            r#"<a:off x="{}" y="{}"/>"#,
            format_i64(offset.x),
            format_i64(offset.y)
        )?;
    }
    if let Some(size) = transform.size {
        write!(
            writer,
            r#"<a:ext cx="{}" cy="{}"/>"#,
            format_u64(size.cx),
            format_u64(size.cy)
        )?;
    }
    write_raw(writer, &transform.unrecognized)?;

    write!(writer, "</xdr:xfrm>")?;
    Ok(())
}

fn write_graphic<W: Write>(writer: &mut W, graphic: &GraphicalObject) -> Result<()> {
    write!(writer, "<a:graphic")?;
    write_reserved(writer, &graphic.reserved)?;

    if graphic.data.is_none() && graphic.unrecognized.is_empty() {
        write!(writer, "/>")?;
        return Ok(());
    }
    write!(writer, ">")?;

    if let Some(ref data) = graphic.data {
        write_graphic_data(writer, data)?;
    }
    write_raw(writer, &graphic.unrecognized)?;

    write!(writer, "</a:graphic>")?;
    Ok(())
}

fn write_graphic_data<W: Write>(writer: &mut W, data: &GraphicalObjectData) -> Result<()> {
    write!(writer, "<a:graphicData")?;
    if let Some(ref uri) = data.uri {
        write!(writer, r#" uri="{}""#, escape_xml(uri))?;
    }
    write_reserved(writer, &data.reserved)?;

    if data.payload.is_none() && data.unrecognized.is_empty() {
        write!(writer, "/>")?;
        return Ok(());
    }
    write!(writer, ">")?;

    match data.payload {
        Some(GraphicPayload::Chart(ref chart)) => write_chart_ref(writer, chart)?,
        Some(GraphicPayload::Unrecognized(ref raw)) => writer.write_all(raw.as_bytes())?,
        None => {},
    }
    write_raw(writer, &data.unrecognized)?;

    write!(writer, "</a:graphicData>")?;
    Ok(())
}

fn write_chart_ref<W: Write>(writer: &mut W, chart: &ChartRef) -> Result<()> {
    if chart.r_id.is_empty() {
        return Err(DrawingError::MissingRequiredField {
            element: "c:chart".to_string(),
            field: "r:id".to_string(),
        });
    }
    write!(
        writer,
        r#"<c:chart xmlns:c="{}" xmlns:r="{}" r:id="{}""#,
        ns::CHART,
        ns::RELATIONSHIPS,
        escape_xml(&chart.r_id)
    )?;
    write_reserved(writer, &chart.reserved)?;
    close_element(writer, "c:chart", &chart.unrecognized)
}

/// Emit reservoir entries, names as written, in insertion order.
fn write_reserved<W: Write>(writer: &mut W, reserved: &ReservedAttributes) -> Result<()> {
    for attr in reserved.iter() {
        write!(writer, r#" {}="{}""#, attr.name, escape_xml(&attr.value))?;
    }
    Ok(())
}

/// Emit captured sub-trees byte-for-byte.
fn write_raw<W: Write>(writer: &mut W, raw: &[RawXml]) -> Result<()> {
    for blob in raw {
        writer.write_all(blob.as_bytes())?;
    }
    Ok(())
}

/// Close an element whose only remaining content is raw captures:
/// self-closing when there are none.
fn close_element<W: Write>(writer: &mut W, qname: &str, raw: &[RawXml]) -> Result<()> {
    if raw.is_empty() {
        write!(writer, "/>")?;
    } else {
        write!(writer, ">")?;
        write_raw(writer, raw)?;
        write!(writer, "</{qname}>")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::reader::parse_graphic_frame;
    use crate::drawing::reserved::ReservedAttr;
    use crate::drawing::transform::{Point2D, Size2D};

    const WRAPPER_OPEN: &str = concat!(
        r#"<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing""#,
        r#" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">"#
    );
    const WRAPPER_CLOSE: &str = "</xdr:wsDr>";

    fn round_trip(fragment: &str) -> String {
        let wrapped = format!("{WRAPPER_OPEN}{fragment}{WRAPPER_CLOSE}");
        let frame = parse_graphic_frame(wrapped.as_bytes()).unwrap();
        frame.to_xml().unwrap()
    }

    #[test]
    fn test_chart_frame_round_trip_is_byte_identical() {
        let fragment = concat!(
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
        assert_eq!(round_trip(fragment), fragment);
    }

    #[test]
    fn test_reservoir_round_trip_preserves_order_and_values() {
        let fragment = concat!(
            r#"<xdr:graphicFrame macro="" fPublished="1">"#,
            r#"<xdr:nvGraphicFramePr>"#,
            r#"<xdr:cNvPr id="5" name="Frame 5" title="Quarterly" hidden="1"/>"#,
            r#"<xdr:cNvGraphicFramePr/>"#,
            r#"</xdr:nvGraphicFramePr>"#,
            r#"</xdr:graphicFrame>"#
        );
        assert_eq!(round_trip(fragment), fragment);
    }

    #[test]
    fn test_unknown_payload_round_trip() {
        let fragment = concat!(
            r#"<xdr:graphicFrame>"#,
            r#"<xdr:nvGraphicFramePr><xdr:cNvPr id="3" name="Diagram 1"/></xdr:nvGraphicFramePr>"#,
            r#"<a:graphic><a:graphicData uri="urn:example:diagram">"#,
            r#"<dgm:relIds xmlns:dgm="urn:example:diagram" dm="rId4" lo="rId5"/>"#,
            r#"</a:graphicData></a:graphic>"#,
            r#"</xdr:graphicFrame>"#
        );
        assert_eq!(round_trip(fragment), fragment);
    }

    #[test]
    fn test_transform_extras_round_trip() {
        let fragment = concat!(
            r#"<xdr:graphicFrame>"#,
            r#"<xdr:nvGraphicFramePr>"#,
            r#"<xdr:cNvPr id="6" name="Rotated"/>"#,
            r#"<xdr:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></xdr:cNvGraphicFramePr>"#,
            r#"</xdr:nvGraphicFramePr>"#,
            r#"<xdr:xfrm rot="60000" flipH="1"><a:off x="-1" y="0"/><a:ext cx="10" cy="20"/></xdr:xfrm>"#,
            r#"<xdr:futureElement keep="me"/>"#,
            r#"</xdr:graphicFrame>"#
        );
        assert_eq!(round_trip(fragment), fragment);
    }

    #[test]
    fn test_modeled_children_reordered_to_schema_order() {
        let shuffled = concat!(
            r#"<xdr:graphicFrame>"#,
            r#"<xdr:xfrm><a:off x="1" y="2"/></xdr:xfrm>"#,
            r#"<xdr:nvGraphicFramePr><xdr:cNvPr id="8" name="Shuffled"/></xdr:nvGraphicFramePr>"#,
            r#"</xdr:graphicFrame>"#
        );
        let canonical = concat!(
            r#"<xdr:graphicFrame>"#,
            r#"<xdr:nvGraphicFramePr><xdr:cNvPr id="8" name="Shuffled"/></xdr:nvGraphicFramePr>"#,
            r#"<xdr:xfrm><a:off x="1" y="2"/></xdr:xfrm>"#,
            r#"</xdr:graphicFrame>"#
        );
        assert_eq!(round_trip(shuffled), canonical);
    }

    #[test]
    fn test_bare_placeholder_encodes_minimal_form() {
        let frame = GraphicFrame::new(1, "Placeholder");
        assert_eq!(
            frame.to_xml().unwrap(),
            concat!(
                r#"<xdr:graphicFrame>"#,
                r#"<xdr:nvGraphicFramePr>"#,
                r#"<xdr:cNvPr id="1" name="Placeholder"/>"#,
                r#"<xdr:cNvGraphicFramePr/>"#,
                r#"</xdr:nvGraphicFramePr>"#,
                r#"</xdr:graphicFrame>"#
            )
        );
    }

    #[test]
    fn test_built_chart_frame_matches_decoded_form() {
        let mut frame = GraphicFrame::new(2, "Chart 1")
            .with_transform(
                Transform2D::new()
                    .with_offset(Point2D::new(1, 2))
                    .with_size(Size2D::new(3, 4)),
            )
            .with_chart("rId1");
        frame.reserved.push(ReservedAttr::new("macro", ""));

        let encoded = frame.to_xml().unwrap();
        let decoded = parse_graphic_frame(encoded.as_bytes()).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_name_is_escaped_on_encode() {
        let frame = GraphicFrame::new(4, "P & L <2026>");
        let xml = frame.to_xml().unwrap();
        assert!(xml.contains(r#"name="P &amp; L &lt;2026&gt;""#));

        let decoded = parse_graphic_frame(xml.as_bytes()).unwrap();
        assert_eq!(decoded.name(), "P & L <2026>");
    }

    #[test]
    fn test_numeric_exactness() {
        let frame = GraphicFrame::new(2, "Chart 1").with_transform(
            Transform2D::new()
                .with_offset(Point2D::new(1, 2))
                .with_size(Size2D::new(3, 4)),
        );
        let xml = frame.to_xml().unwrap();
        assert!(xml.contains(r#"<a:off x="1" y="2"/>"#));
        assert!(xml.contains(r#"<a:ext cx="3" cy="4"/>"#));
    }

    #[test]
    fn test_empty_relationship_id_rejected_on_encode() {
        let frame = GraphicFrame::new(2, "Chart 1").with_chart("");
        assert!(matches!(
            frame.to_xml(),
            Err(DrawingError::MissingRequiredField { element, .. }) if element == "c:chart"
        ));
    }
}
