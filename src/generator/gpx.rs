//! GPX 1.1 writer API

use std::io::{self, Write};

use time::macros::format_description;
use xml::common::XmlVersion;
use xml::writer::{EmitterConfig, EventWriter, XmlEvent};

use super::channels::is_ncname;
use super::document::{ExtensionField, TrackDocument, TrackPoint};
use crate::{Error, Result};

pub const CREATOR: &str = "streams2gpx";

pub const GPX_NS: &str = "http://www.topografix.com/GPX/1/1";
pub const GPX_XSD: &str = "http://www.topografix.com/GPX/1/1/gpx.xsd";
pub const TPX_NS: &str = "http://www.garmin.com/xmlschemas/TrackPointExtension/v1";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

const TPX_PREFIX: &str = "gpxtpx";

/// Render the document as a string
pub fn serialize(doc: &TrackDocument) -> Result<String> {
    let mut buf = vec![];
    write(doc, &mut buf)?;

    String::from_utf8(buf)
        .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Write the document, prolog included, into the writer
pub fn write<W: Write>(doc: &TrackDocument, writer: W) -> Result<()> {
    let mut w = EmitterConfig::new()
        .perform_indent(false)
        .write_document_declaration(true)
        .create_writer(writer);

    w.write(XmlEvent::StartDocument {
        version: XmlVersion::Version10,
        encoding: Some("UTF-8"),
        standalone: None,
    })?;

    let schema_location = format!("{} {}", GPX_NS, GPX_XSD);
    w.write(
        XmlEvent::start_element("gpx")
            .default_ns(GPX_NS)
            .ns("xsi", XSI_NS)
            .ns(TPX_PREFIX, TPX_NS)
            .attr("creator", CREATOR)
            .attr("version", "1.1")
            .attr("xsi:schemaLocation", &schema_location),
    )?;

    let track = &doc.track;
    w.write(
        XmlEvent::start_element("trk")
            .attr("name", &track.name)
            .attr("type", track.activity.as_str()),
    )?;
    w.write(XmlEvent::start_element("trkseg"))?;

    for point in &track.segment.points {
        write_point(&mut w, point)?;
    }

    w.write(XmlEvent::end_element())?; // trkseg
    w.write(XmlEvent::end_element())?; // trk
    w.write(XmlEvent::end_element())?; // gpx

    Ok(())
}

fn write_point<W: Write>(w: &mut EventWriter<W>, point: &TrackPoint) -> Result<()> {
    let time_format =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

    let lat = number(point.latitude());
    let lon = number(point.longitude());
    w.write(
        XmlEvent::start_element("trkpt")
            .attr("lat", &lat)
            .attr("lon", &lon),
    )?;

    write_text(w, "ele", &number(point.elevation))?;
    write_text(w, "time", &point.time.format(time_format)?)?;

    if let Some(ext) = &point.extensions {
        w.write(XmlEvent::start_element("extensions"))?;

        for field in &ext.fields {
            write_field(w, None, field)?;
        }

        if let Some(tpe) = &ext.track_point {
            let name = format!("{}:TrackPointExtension", TPX_PREFIX);
            w.write(XmlEvent::start_element(name.as_str()))?;
            for field in &tpe.fields {
                write_field(w, Some(TPX_PREFIX), field)?;
            }
            w.write(XmlEvent::end_element())?;
        }

        w.write(XmlEvent::end_element())?;
    }

    w.write(XmlEvent::end_element())?;

    Ok(())
}

fn write_field<W: Write>(
    w: &mut EventWriter<W>,
    prefix: Option<&str>,
    field: &ExtensionField,
) -> Result<()> {
    if !is_ncname(&field.tag) {
        return Err(Error::InvalidChannelTag(field.tag.clone()));
    }

    let name = match prefix {
        Some(p) => format!("{}:{}", p, field.tag),
        None => field.tag.clone(),
    };

    write_text(w, &name, &number(field.value))
}

/// Decimal text of the value, `-0` written as `0`
fn number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

fn write_text<W: Write>(w: &mut EventWriter<W>, name: &str, text: &str) -> Result<()> {
    w.write(XmlEvent::start_element(name))?;
    w.write(XmlEvent::characters(text))?;
    w.write(XmlEvent::end_element())?;

    Ok(())
}
