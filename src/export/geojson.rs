// src/export/geojson.rs
//! GeoJSON serialization (RFC 7946)
//!
//! Point sets become a Feature, FeatureCollection, MultiPoint or
//! GeometryCollection depending on the wrapper and multi-point options.
//! Lines and polygons become a Feature or a bare geometry.

use crate::error::{ExportError, Result};
use crate::geometry::{first_props, get_coords, many_to_one_props, position, BoundingBox};
use crate::options::{ExportOptions, Wrapper};
use crate::params::GlobalParams;
use crate::record::{PositionalRecord, Props, RecordId};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use tracing::debug;

/// Convert records to a point-flavoured GeoJSON object
pub fn to_point(
    records: &[PositionalRecord],
    global: &GlobalParams,
    options: &ExportOptions,
) -> Result<GeoJson> {
    if records.is_empty() {
        return Err(ExportError::MissingFields("no positions to export".to_string()));
    }

    let bbox = options.resolve_bbox(records);

    if options.multi_point {
        debug!(points = records.len(), wrapper = %options.wrapper, "exporting MultiPoint");
        let geometry = Geometry::new(Value::MultiPoint(get_coords(records)));
        if options.wrapper.is_bare() {
            return Ok(GeoJson::Geometry(geometry));
        }
        return Ok(GeoJson::Feature(feature(
            geometry,
            global.id.clone(),
            shared_props(records),
            bbox,
        )));
    }

    match (options.wrapper, records) {
        (Wrapper::None, [record]) => {
            debug!("exporting bare Point");
            Ok(GeoJson::Geometry(point_geometry(record)))
        }
        (Wrapper::Geometry, _) | (Wrapper::None, _) => {
            debug!(points = records.len(), "exporting GeometryCollection");
            let geometries = records.iter().map(point_geometry).collect();
            let mut collection = Geometry::new(Value::GeometryCollection(geometries));
            collection.bbox = bbox.map(|b| b.to_vec());
            Ok(GeoJson::Geometry(collection))
        }
        (Wrapper::Feature, [record]) => {
            debug!("exporting Point feature");
            let id = global.id.clone().or_else(|| record.id.clone());
            let props = record.props.clone().unwrap_or_default();
            Ok(GeoJson::Feature(feature(point_geometry(record), id, props, bbox)))
        }
        (Wrapper::Feature, _) => {
            debug!(points = records.len(), "exporting FeatureCollection");
            let features = records.iter().map(point_feature).collect();
            Ok(GeoJson::FeatureCollection(FeatureCollection {
                bbox: bbox.map(|b| b.to_vec()),
                features,
                foreign_members: None,
            }))
        }
    }
}

/// Convert ordered records to a LineString
pub fn to_line_string(
    records: &[PositionalRecord],
    global: &GlobalParams,
    options: &ExportOptions,
) -> Result<GeoJson> {
    if records.len() < 2 {
        return Err(ExportError::TooFewPositions {
            geometry: "LineString",
            required: 2,
            found: records.len(),
        });
    }

    let geometry = Geometry::new(Value::LineString(get_coords(records)));
    Ok(wrap_shape(geometry, records, global, options))
}

/// Convert ordered records to a single-ring Polygon, closing the ring if needed
pub fn to_polygon(
    records: &[PositionalRecord],
    global: &GlobalParams,
    options: &ExportOptions,
) -> Result<GeoJson> {
    if records.len() < 4 {
        return Err(ExportError::TooFewPositions {
            geometry: "Polygon",
            required: 4,
            found: records.len(),
        });
    }

    let mut ring = get_coords(records);
    if ring.first() != ring.last() {
        ring.push(ring[0].clone());
    }

    let geometry = Geometry::new(Value::Polygon(vec![ring]));
    Ok(wrap_shape(geometry, records, global, options))
}

/// Feature with collection id, shared props and bbox, or the bare geometry
fn wrap_shape(
    geometry: Geometry,
    records: &[PositionalRecord],
    global: &GlobalParams,
    options: &ExportOptions,
) -> GeoJson {
    if options.wrapper.is_bare() {
        return GeoJson::Geometry(geometry);
    }

    let bbox = options.resolve_bbox(records);
    GeoJson::Feature(feature(geometry, global.id.clone(), shared_props(records), bbox))
}

fn shared_props(records: &[PositionalRecord]) -> Props {
    if first_props(records).is_some() {
        many_to_one_props(records).unwrap_or_default()
    } else {
        Props::new()
    }
}

fn point_geometry(record: &PositionalRecord) -> Geometry {
    Geometry::new(Value::Point(position(record)))
}

/// Member of a point FeatureCollection. An `id` key in the props is moved to
/// the feature id when the record has none of its own.
fn point_feature(record: &PositionalRecord) -> Feature {
    let mut props = record.props.clone().unwrap_or_default();
    let prop_id = props.get("id").and_then(RecordId::from_value);
    if prop_id.is_some() {
        props.shift_remove("id");
    }
    let id = record.id.clone().or(prop_id);

    feature(point_geometry(record), id, props, None)
}

fn feature(
    geometry: Geometry,
    id: Option<RecordId>,
    properties: Props,
    bbox: Option<BoundingBox>,
) -> Feature {
    Feature {
        bbox: bbox.map(|b| b.to_vec()),
        geometry: Some(geometry),
        id: id.map(Into::into),
        properties: Some(properties),
        foreign_members: None,
    }
}
