// tests/geojson.rs
mod common;

use common::{default_global, example_fix, example_series, props};
use geojson::{feature::Id, GeoJson, Value};
use location_export::export::geojson::{to_line_string, to_point};
use location_export::{get_coords, ExportOptions, Wrapper};
use serde_json::json;

#[test]
fn test_single_point_to_feature() {
    let fix = example_fix();
    let GeoJson::Feature(feature) = to_point(&[fix.clone()], &default_global(), &ExportOptions::default()).unwrap()
    else {
        panic!("expected a Feature");
    };

    assert!(feature.id.is_none());
    assert_eq!(feature.properties, Some(serde_json::Map::new()));
    let Some(Value::Point(coords)) = feature.geometry.map(|g| g.value) else {
        panic!("expected a Point");
    };
    assert_eq!(coords, get_coords(&[fix])[0]);
    assert_eq!(coords.len(), 3);
}

#[test]
fn test_single_point_with_id_and_props() {
    let test_props = props(json!({ "name": "potato", "population": 5, "items": [5, 6, 7] }));
    let fix = example_fix().with_props(test_props.clone());
    let global = default_global().with_id("test");

    let GeoJson::Feature(feature) = to_point(&[fix], &global, &ExportOptions::default()).unwrap() else {
        panic!("expected a Feature");
    };
    assert_eq!(feature.id, Some(Id::String("test".to_string())));
    assert_eq!(feature.properties, Some(test_props));
}

#[test]
fn test_single_point_unwrapped() {
    let options = ExportOptions { wrapper: Wrapper::None, ..Default::default() };
    let GeoJson::Geometry(geometry) = to_point(&[example_fix()], &default_global(), &options).unwrap() else {
        panic!("expected a Geometry");
    };
    assert_eq!(geometry.value, Value::Point(get_coords(&[example_fix()])[0].clone()));
}

#[test]
fn test_many_points_to_feature_collection() {
    let mut data = example_series();
    for (i, record) in data.iter_mut().enumerate() {
        record.id = Some((i as u64).into());
    }
    let options = ExportOptions { bbox: true, ..Default::default() };

    let GeoJson::FeatureCollection(fc) = to_point(&data, &default_global(), &options).unwrap() else {
        panic!("expected a FeatureCollection");
    };
    assert_eq!(fc.features.len(), data.len());
    assert_eq!(fc.bbox.as_ref().map(|b| b.len()), Some(6));
    for (i, feature) in fc.features.iter().enumerate() {
        assert_eq!(feature.id, Some(Id::Number((i as u64).into())));
    }
}

#[test]
fn test_many_points_to_2d_feature_collection() {
    let data: Vec<_> = example_series().iter().map(|r| r.flatten()).collect();
    let options = ExportOptions { bbox: true, ..Default::default() };

    let GeoJson::FeatureCollection(fc) = to_point(&data, &default_global(), &options).unwrap() else {
        panic!("expected a FeatureCollection");
    };
    assert_eq!(fc.features.len(), data.len());
    assert_eq!(fc.bbox.map(|b| b.len()), Some(4));
}

#[test]
fn test_many_points_to_geometry_collection() {
    let data = example_series();
    let options = ExportOptions { wrapper: Wrapper::Geometry, bbox: true, ..Default::default() };

    let GeoJson::Geometry(geometry) = to_point(&data, &default_global(), &options).unwrap() else {
        panic!("expected a Geometry");
    };
    let Value::GeometryCollection(ref geometries) = geometry.value else {
        panic!("expected a GeometryCollection");
    };
    assert_eq!(geometries.len(), data.len());
    assert_eq!(geometry.bbox.map(|b| b.len()), Some(6));
}

#[test]
fn test_many_points_to_multipoint_feature() {
    let test_props = props(json!({ "name": "jive" }));
    let mut data = example_series();
    data[0].props = Some(test_props.clone());
    let options = ExportOptions { multi_point: true, bbox: true, ..Default::default() };
    let global = default_global().with_id("test mp");

    let GeoJson::Feature(feature) = to_point(&data, &global, &options).unwrap() else {
        panic!("expected a Feature");
    };
    assert_eq!(feature.id, Some(Id::String("test mp".to_string())));
    assert_eq!(feature.bbox.map(|b| b.len()), Some(6));
    assert_eq!(feature.properties, Some(test_props));
    let Some(Value::MultiPoint(coords)) = feature.geometry.map(|g| g.value) else {
        panic!("expected a MultiPoint");
    };
    assert_eq!(coords.len(), data.len());
}

#[test]
fn test_many_points_to_bare_multipoint() {
    let data = example_series();
    let options = ExportOptions { multi_point: true, wrapper: Wrapper::None, ..Default::default() };
    let global = default_global().with_id("test mp");

    let GeoJson::Geometry(geometry) = to_point(&data, &global, &options).unwrap() else {
        panic!("expected a Geometry");
    };
    let Value::MultiPoint(coords) = geometry.value else {
        panic!("expected a MultiPoint");
    };
    assert_eq!(coords, get_coords(&data));
}

#[test]
fn test_line_with_one_point() {
    let err = to_line_string(&[example_fix()], &default_global(), &ExportOptions::default()).unwrap_err();
    assert!(err
        .to_string()
        .contains("coordinates must be an array of two or more positions"));
}

#[test]
fn test_line_as_feature() {
    let global = default_global().with_id("test ls");
    let GeoJson::Feature(feature) =
        to_line_string(&example_series(), &global, &ExportOptions::default()).unwrap()
    else {
        panic!("expected a Feature");
    };
    assert_eq!(feature.id, Some(Id::String("test ls".to_string())));
    assert!(matches!(feature.geometry.map(|g| g.value), Some(Value::LineString(_))));
}

#[test]
fn test_line_with_props_and_bbox() {
    let test_props = props(json!({ "name": "hey", "destination": "a park" }));
    let mut data = example_series();
    data[0].props = Some(test_props.clone());
    let options = ExportOptions { bbox: true, ..Default::default() };

    let GeoJson::Feature(feature) =
        to_line_string(&data, &default_global().with_id("test ls"), &options).unwrap()
    else {
        panic!("expected a Feature");
    };
    assert_eq!(feature.properties, Some(test_props));
    assert_eq!(feature.bbox.map(|b| b.len()), Some(6));
}

#[test]
fn test_line_two_points_as_geometry() {
    let data: Vec<_> = example_series().into_iter().take(2).collect();
    let options = ExportOptions { wrapper: Wrapper::Geometry, ..Default::default() };

    let GeoJson::Geometry(geometry) = to_line_string(&data, &default_global(), &options).unwrap() else {
        panic!("expected a Geometry");
    };
    let Value::LineString(coords) = geometry.value else {
        panic!("expected a LineString");
    };
    assert_eq!(coords.len(), 2);
}

#[test]
fn test_serialized_output_is_geojson() {
    let geojson = to_point(&[example_fix()], &default_global(), &ExportOptions::default()).unwrap();
    let text = serde_json::to_string(&geojson).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["type"], "Feature");
    assert_eq!(value["geometry"]["type"], "Point");
    assert_eq!(value["properties"], json!({}));
}
