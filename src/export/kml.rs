// src/export/kml.rs
//! KML 2.2 placemarks for point sets and lines.
//!
//! See <https://developers.google.com/kml/documentation/kml_tut>

use crate::error::{ExportError, Result};
use crate::geometry::get_bbox;
use crate::options::ExportOptions;
use crate::params::GlobalParams;
use crate::record::PositionalRecord;
use crate::xml::{value_text, XmlNode};
use tracing::debug;

pub const KML_NS: &str = "http://www.opengis.net/kml/2.2";

// Camera hint for line placemarks
const LOOK_AT_HEADING: i32 = -60;
const LOOK_AT_TILT: i32 = 70;
const LOOK_AT_RANGE: i32 = 6000;

/// One `<Placemark>` per record. Every record needs a name and a
/// description.
pub fn to_placemarks(
    records: &[PositionalRecord],
    global: &GlobalParams,
    _options: &ExportOptions,
) -> Result<XmlNode> {
    let with_props = records.iter().filter(|r| r.props.is_some()).count();
    if with_props != records.len() {
        return Err(missing_point_fields());
    }
    debug!(points = records.len(), "exporting KML placemarks");

    let mut document = document(global);
    for record in records {
        document.push(point_placemark(record, global)?);
    }

    Ok(XmlNode::new("kml").attr("xmlns", KML_NS).child(document))
}

/// A single line `<Placemark>` looking at the middle of the line
pub fn to_line_placemark(
    records: &[PositionalRecord],
    global: &GlobalParams,
    options: &ExportOptions,
) -> Result<XmlNode> {
    if records.len() < 2 {
        return Err(ExportError::TooFewPositions {
            geometry: "LineString",
            required: 2,
            found: records.len(),
        });
    }

    let name = options
        .name
        .clone()
        .or_else(|| records[0].prop_str("name").map(str::to_string))
        .ok_or_else(|| {
            ExportError::MissingFields("a name in options or props is required".to_string())
        })?;
    debug!(points = records.len(), %name, "exporting KML line");

    let (longitude, latitude) = get_bbox(records)
        .map(|bbox| bbox.center())
        .unwrap_or((records[0].coords.longitude, records[0].coords.latitude));

    let coordinates = records
        .iter()
        .map(|r| r.coords.to_coordinate_string())
        .collect::<Vec<_>>()
        .join("\n");

    let placemark = XmlNode::new("Placemark")
        .child(XmlNode::text_element("name", name))
        .child(
            XmlNode::new("LookAt")
                .child(XmlNode::text_element("longitude", longitude))
                .child(XmlNode::text_element("latitude", latitude))
                .child(XmlNode::text_element("heading", LOOK_AT_HEADING))
                .child(XmlNode::text_element("tilt", LOOK_AT_TILT))
                .child(XmlNode::text_element("range", LOOK_AT_RANGE)),
        )
        .child(
            XmlNode::new("LineString")
                .child(XmlNode::text_element("extrude", 1))
                .child(XmlNode::text_element("coordinates", coordinates)),
        );

    Ok(XmlNode::new("kml")
        .attr("xmlns", KML_NS)
        .child(document(global).child(placemark)))
}

fn document(global: &GlobalParams) -> XmlNode {
    XmlNode::new("Document").child(XmlNode::text_element("name", &global.name))
}

fn point_placemark(record: &PositionalRecord, global: &GlobalParams) -> Result<XmlNode> {
    let name = record
        .id
        .as_ref()
        .map(|id| id.to_string())
        .or_else(|| record.prop_str("name").map(str::to_string))
        .or_else(|| global.id.as_ref().map(|id| id.to_string()))
        .ok_or_else(missing_point_fields)?;

    let description = record
        .props
        .as_ref()
        .and_then(|p| p.get("desc").or_else(|| p.get("description")))
        .map(value_text)
        .ok_or_else(missing_point_fields)?;

    Ok(XmlNode::new("Placemark")
        .child(XmlNode::text_element("name", name))
        .child(XmlNode::text_element("description", description))
        .child(
            XmlNode::new("Point").child(XmlNode::text_element(
                "coordinates",
                record.coords.to_coordinate_string(),
            )),
        ))
}

fn missing_point_fields() -> ExportError {
    ExportError::MissingFields("name and description are required for each point".to_string())
}
