// src/export/gpx.rs
//! GPX 1.1 documents: a set of waypoints, or one track (or route) of
//! timestamped points.
//!
//! See <https://www.topografix.com/GPX/1/1/>

use crate::error::{ExportError, Result};
use crate::geometry::BoundingBox;
use crate::options::ExportOptions;
use crate::params::{Copyright, GlobalParams, Link, Metadata, Person};
use crate::record::{format_timestamp, PositionalRecord, Props, RecordId};
use crate::validate;
use crate::xml::{element_name, value_text, XmlNode};
use tracing::{debug, warn};

pub const GPX_VERSION: &str = "1.1";
pub const GPX_NS: &str = "http://www.topografix.com/GPX/1/1";
pub const GPX_XSD: &str = "http://www.topografix.com/GPX/1/1/gpx.xsd";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// One `<wpt>` per record
pub fn to_waypoints(
    records: &[PositionalRecord],
    global: &GlobalParams,
    options: &ExportOptions,
) -> XmlNode {
    debug!(points = records.len(), "exporting GPX waypoints");
    let bbox = options.resolve_bbox(records);

    let mut gpx = root(global);
    gpx.push(metadata(global, bbox.as_ref()));
    gpx.extend(records.iter().map(|record| waypoint("wpt", record, None)));
    gpx
}

/// One `<trk>` with a single `<trkseg>`, or one `<rte>` when
/// `options.route` is set. Points keep their input order and fall back to
/// their index as a name.
pub fn to_track(
    records: &[PositionalRecord],
    global: &GlobalParams,
    options: &ExportOptions,
) -> Result<XmlNode> {
    let kind = if options.route { "Route" } else { "Track" };
    if records.len() < 2 {
        return Err(ExportError::TooFewPositions {
            geometry: kind,
            required: 2,
            found: records.len(),
        });
    }
    debug!(points = records.len(), kind, "exporting GPX line");

    let bbox = options.resolve_bbox(records);
    let mut gpx = root(global);
    gpx.push(metadata(global, bbox.as_ref()));

    let (container, point_tag) = if options.route { ("rte", "rtept") } else { ("trk", "trkpt") };
    let mut line = XmlNode::new(container);
    if let Some(ref id) = global.id {
        line.push(XmlNode::text_element("name", id));
    }

    let points = records
        .iter()
        .enumerate()
        .map(|(i, record)| waypoint(point_tag, record, Some(i)));

    if options.route {
        line.extend(points);
    } else {
        let mut segment = XmlNode::new("trkseg");
        segment.extend(points);
        line.push(segment);
    }

    gpx.push(line);
    Ok(gpx)
}

fn root(global: &GlobalParams) -> XmlNode {
    XmlNode::new("gpx")
        .attr("version", GPX_VERSION)
        .attr("creator", &global.name)
        .attr("xmlns", GPX_NS)
        .attr("xmlns:xsi", XSI_NS)
        .attr("xsi:schemaLocation", format!("{} {}", GPX_NS, GPX_XSD))
}

/// Document `<metadata>`. Sub-objects that fail validation are left out.
fn metadata(global: &GlobalParams, bbox: Option<&BoundingBox>) -> XmlNode {
    let empty = Metadata::default();
    let meta = global.metadata.as_ref().unwrap_or(&empty);
    let mut node = XmlNode::new("metadata");

    if let Some(ref name) = meta.name {
        node.push(XmlNode::text_element("name", name));
    }
    if let Some(ref desc) = meta.desc {
        node.push(XmlNode::text_element("desc", desc));
    }

    if let Some(ref author) = meta.author {
        if validate::is_valid_person(author) {
            node.push(person("author", author));
        } else {
            warn!("dropping invalid metadata author");
        }
    }

    if let Some(ref copyright) = meta.copyright {
        if validate::is_valid_copyright(copyright) {
            node.push(copyright_node(copyright, global));
        } else {
            warn!("dropping metadata copyright with invalid license url");
        }
    }

    match meta.link {
        Some(ref link) if validate::is_valid_link(link) => node.push(link_node(link)),
        _ => {
            if meta.link.is_some() {
                warn!("dropping invalid metadata link");
            }
            if validate::is_http_url(&global.url) {
                node.push(link_node(&Link::new(&global.url).with_text(&global.name)));
            }
        }
    }

    if let Some(time) = meta.time {
        match format_timestamp(time).filter(|_| validate::is_valid_metadata_time(time)) {
            Some(iso) => node.push(XmlNode::text_element("time", iso)),
            None => warn!(time, "dropping implausible metadata time"),
        }
    }

    if let Some(bbox) = bbox {
        node.push(
            XmlNode::new("bounds")
                .attr("minlat", bbox.south())
                .attr("minlon", bbox.west())
                .attr("maxlat", bbox.north())
                .attr("maxlon", bbox.east()),
        );
    }

    if !meta.extra.is_empty() {
        // Keys equal after lowercasing collapse into one tag: the first
        // position is kept, the last value wins.
        let mut extra = Props::new();
        for (key, value) in &meta.extra {
            extra.insert(element_name(&key.to_lowercase()), value.clone());
        }
        node.push(extensions(&extra));
    }

    node
}

fn person(tag: &str, person: &Person) -> XmlNode {
    let mut node = XmlNode::new(tag);
    if let Some(ref name) = person.name {
        node.push(XmlNode::text_element("name", name));
    }
    if let Some((id, domain)) = person.email.as_deref().and_then(|e| e.split_once('@')) {
        node.push(XmlNode::new("email").attr("id", id).attr("domain", domain));
    }
    if let Some(ref link) = person.link {
        node.push(link_node(link));
    }
    node
}

fn copyright_node(copyright: &Copyright, global: &GlobalParams) -> XmlNode {
    let author = copyright.author.as_deref().unwrap_or(&global.name);
    let mut node = XmlNode::new("copyright")
        .attr("author", author)
        .child(XmlNode::text_element("year", validate::copyright_year(copyright)));
    if let Some(ref license) = copyright.license {
        node.push(XmlNode::text_element("license", license));
    }
    node
}

fn link_node(link: &Link) -> XmlNode {
    let mut node = XmlNode::new("link").attr("href", &link.href);
    if let Some(ref text) = link.text {
        node.push(XmlNode::text_element("text", text));
    }
    if let Some(ref mime_type) = link.mime_type {
        node.push(XmlNode::text_element("type", mime_type));
    }
    node
}

/// A `wpt`/`trkpt`/`rtept` element. Known props (`id`, `name`, `desc`,
/// `description`) are consumed; whatever is left becomes `<extensions>`.
fn waypoint(tag: &str, record: &PositionalRecord, index: Option<usize>) -> XmlNode {
    let coords = &record.coords;
    let mut node = XmlNode::new(tag)
        .attr("lat", coords.latitude)
        .attr("lon", coords.longitude);
    let mut props = record.props.clone().unwrap_or_default();

    match validate::valid_altitude(coords) {
        Some(ele) => node.push(XmlNode::text_element("ele", ele)),
        None if coords.altitude.is_some() => {
            debug!(altitude = coords.altitude, "omitting implausible altitude")
        }
        None => {}
    }

    match record.iso_time() {
        Some(time) => node.push(XmlNode::text_element("time", time)),
        None => warn!(timestamp = record.timestamp, "timestamp out of range"),
    }

    if let Some(heading) = coords.heading {
        node.push(XmlNode::text_element("magvar", heading));
    }

    let prop_id = take(&mut props, "id").and_then(|v| RecordId::from_value(&v));
    let name = record
        .id
        .clone()
        .or(prop_id)
        .map(|id| id.to_string())
        .or_else(|| take(&mut props, "name").map(|v| value_text(&v)))
        .or_else(|| index.map(|i| i.to_string()));
    if let Some(name) = name {
        node.push(XmlNode::text_element("name", name));
    }

    let desc = take(&mut props, "desc").or_else(|| take(&mut props, "description"));
    if let Some(desc) = desc {
        node.push(XmlNode::text_element("desc", value_text(&desc)));
    }

    if !props.is_empty() {
        node.push(extensions(&props));
    }

    node
}

fn take(props: &mut Props, key: &str) -> Option<serde_json::Value> {
    props.shift_remove(key)
}

fn extensions(props: &Props) -> XmlNode {
    let mut node = XmlNode::new("extensions");
    for (key, value) in props {
        node.push(XmlNode::text_element(element_name(key), value_text(value)));
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Coords;
    use serde_json::json;

    fn fix(altitude: f64, altitude_accuracy: f64) -> PositionalRecord {
        let mut coords = Coords::new(-121.4438241, 48.8317425);
        coords.altitude = Some(altitude);
        coords.altitude_accuracy = Some(altitude_accuracy);
        coords.heading = Some(0.0);
        PositionalRecord::new(coords, 1674709638052)
    }

    fn props(value: serde_json::Value) -> Props {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_root_attributes() {
        let global = GlobalParams::default().with_name("tracker");
        let gpx = to_waypoints(&[fix(36.9, 2.53)], &global, &ExportOptions::default());
        assert_eq!(gpx.name, "gpx");
        assert_eq!(gpx.attribute("version"), Some("1.1"));
        assert_eq!(gpx.attribute("creator"), Some("tracker"));
        assert_eq!(
            gpx.attribute("xsi:schemaLocation"),
            Some("http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd")
        );
    }

    #[test]
    fn test_waypoint_fields() {
        let gpx = to_waypoints(&[fix(36.9, 2.53)], &GlobalParams::default(), &ExportOptions::default());
        let wpt = gpx.find("wpt").unwrap();
        assert_eq!(wpt.attribute("lat"), Some("48.8317425"));
        assert_eq!(wpt.attribute("lon"), Some("-121.4438241"));
        assert_eq!(wpt.path("ele").and_then(|n| n.text()), Some("36.9"));
        assert_eq!(wpt.path("time").and_then(|n| n.text()), Some("2023-01-26T05:07:18.052Z"));
        assert_eq!(wpt.path("magvar").and_then(|n| n.text()), Some("0"));
        assert!(wpt.find("name").is_none());
    }

    #[test]
    fn test_implausible_altitude_omitted() {
        let gpx = to_waypoints(&[fix(10.0, 0.0)], &GlobalParams::default(), &ExportOptions::default());
        assert!(gpx.path("wpt/ele").is_none());
        assert!(gpx.path("wpt/time").is_some());
    }

    #[test]
    fn test_name_desc_and_extensions() {
        let record = fix(36.9, 2.53).with_props(props(json!({
            "name": "camp",
            "description": "by the lake",
            "Top Speed": 4.5
        })));
        let gpx = to_waypoints(&[record], &GlobalParams::default(), &ExportOptions::default());
        let wpt = gpx.find("wpt").unwrap();
        assert_eq!(wpt.path("name").and_then(|n| n.text()), Some("camp"));
        assert_eq!(wpt.path("desc").and_then(|n| n.text()), Some("by the lake"));
        let ext = wpt.find("extensions").unwrap();
        assert_eq!(ext.children.len(), 1);
        assert_eq!(ext.path("Top_Speed").and_then(|n| n.text()), Some("4.5"));
    }

    #[test]
    fn test_id_wins_over_props_name() {
        let record = fix(36.9, 2.53)
            .with_id(12u64)
            .with_props(props(json!({ "name": "camp" })));
        let gpx = to_waypoints(&[record], &GlobalParams::default(), &ExportOptions::default());
        let wpt = gpx.find("wpt").unwrap();
        assert_eq!(wpt.path("name").and_then(|n| n.text()), Some("12"));
        assert_eq!(wpt.path("extensions/name").and_then(|n| n.text()), Some("camp"));
    }

    #[test]
    fn test_track_structure() {
        let records = vec![fix(36.9, 2.53), fix(37.9, 2.53), fix(38.9, 2.53)];
        let global = GlobalParams::default().with_id("morning");
        let gpx = to_track(&records, &global, &ExportOptions::default()).unwrap();

        let trk = gpx.find("trk").unwrap();
        assert_eq!(trk.path("name").and_then(|n| n.text()), Some("morning"));
        let points: Vec<_> = trk.path("trkseg").unwrap().find_all("trkpt").collect();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2].path("name").and_then(|n| n.text()), Some("2"));
        assert!(gpx.find("wpt").is_none());
    }

    #[test]
    fn test_route_structure() {
        let records = vec![fix(36.9, 2.53), fix(37.9, 2.53)];
        let options = ExportOptions { route: true, ..Default::default() };
        let gpx = to_track(&records, &GlobalParams::default(), &options).unwrap();
        let rte = gpx.find("rte").unwrap();
        assert_eq!(rte.find_all("rtept").count(), 2);
        assert!(gpx.find("trk").is_none());
    }

    #[test]
    fn test_track_needs_two_points() {
        let err = to_track(&[fix(36.9, 2.53)], &GlobalParams::default(), &ExportOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("two or more positions"));
    }

    #[test]
    fn test_metadata_validation() {
        let metadata: Metadata = serde_json::from_value(json!({
            "name": "Walk",
            "author": { "name": "Ada", "email": "not-an-email" },
            "copyright": { "author": "Ada", "year": 2020, "license": "https://mit-license.org/" },
            "link": { "href": "ftp://example.com" },
            "time": 1674709638052i64,
            "Keywords": "hike"
        }))
        .unwrap();
        let global = GlobalParams::default().with_metadata(metadata);
        let gpx = to_waypoints(&[fix(36.9, 2.53)], &global, &ExportOptions::default());
        let meta = gpx.find("metadata").unwrap();

        assert_eq!(meta.path("name").and_then(|n| n.text()), Some("Walk"));
        assert!(meta.find("author").is_none());
        assert_eq!(meta.path("copyright/year").and_then(|n| n.text()), Some("2020"));
        assert_eq!(meta.find("copyright").and_then(|n| n.attribute("author")), Some("Ada"));
        assert_eq!(meta.find("link").and_then(|n| n.attribute("href")), Some(global.url.as_str()));
        assert_eq!(meta.path("time").and_then(|n| n.text()), Some("2023-01-26T05:07:18.052Z"));
        assert_eq!(meta.path("extensions/keywords").and_then(|n| n.text()), Some("hike"));
    }

    #[test]
    fn test_metadata_extension_keys_collapse() {
        let metadata: Metadata = serde_json::from_value(json!({
            "Weather": "rain",
            "Wind": 12,
            "weather": "sunny"
        }))
        .unwrap();
        let global = GlobalParams::default().with_metadata(metadata);
        let gpx = to_waypoints(&[fix(36.9, 2.53)], &global, &ExportOptions::default());
        let ext = gpx.path("metadata/extensions").unwrap();

        let names: Vec<_> = ext.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["weather", "wind"]);
        assert_eq!(ext.path("weather").and_then(|n| n.text()), Some("sunny"));
    }

    #[test]
    fn test_metadata_author_email_split() {
        let metadata = Metadata {
            author: Some(Person {
                name: Some("Ada".to_string()),
                email: Some("ada@example.com".to_string()),
                link: None,
            }),
            time: Some(0),
            ..Default::default()
        };
        let global = GlobalParams::default().with_metadata(metadata);
        let gpx = to_waypoints(&[], &global, &ExportOptions::default());
        let email = gpx.path("metadata/author/email").unwrap();
        assert_eq!(email.attribute("id"), Some("ada"));
        assert_eq!(email.attribute("domain"), Some("example.com"));
        assert!(gpx.path("metadata/time").is_none());
    }

    #[test]
    fn test_bounds_from_bbox() {
        let mut second = fix(40.0, 2.0);
        second.coords.latitude = 48.9;
        second.coords.longitude = -121.3;
        let options = ExportOptions { bbox: true, ..Default::default() };
        let gpx = to_waypoints(&[fix(36.9, 2.53), second], &GlobalParams::default(), &options);
        let bounds = gpx.path("metadata/bounds").unwrap();
        assert_eq!(bounds.attribute("minlat"), Some("48.8317425"));
        assert_eq!(bounds.attribute("maxlat"), Some("48.9"));
        assert_eq!(bounds.attribute("minlon"), Some("-121.4438241"));
        assert_eq!(bounds.attribute("maxlon"), Some("-121.3"));
    }
}
