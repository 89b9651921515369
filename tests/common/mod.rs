// tests/common/mod.rs
//! Shared fixtures: one real fix and a short walk of ten fixes

#![allow(dead_code)]

use location_export::{Coords, GlobalParams, PositionalRecord, Props};

pub fn example_fix() -> PositionalRecord {
    PositionalRecord {
        coords: Coords {
            longitude: -121.4438241,
            latitude: 48.8317425,
            altitude: Some(36.900001525878906),
            accuracy: Some(11.553999900817871),
            altitude_accuracy: Some(2.5298962593078613),
            heading: Some(0.0),
            speed: Some(0.0),
        },
        mocked: false,
        timestamp: 1674709638052,
        id: None,
        props: None,
    }
}

/// Ten fixes one second apart, heading north-east and climbing
pub fn example_series() -> Vec<PositionalRecord> {
    (0..10)
        .map(|i| {
            let mut record = example_fix();
            record.coords.longitude += i as f64 * 0.0002;
            record.coords.latitude += i as f64 * 0.0001;
            record.coords.altitude = Some(36.9 + i as f64 * 0.5);
            record.coords.heading = Some(45.0);
            record.coords.speed = Some(1.2);
            record.timestamp += i as i64 * 1000;
            record
        })
        .collect()
}

pub fn default_global() -> GlobalParams {
    GlobalParams::default()
}

pub fn props(value: serde_json::Value) -> Props {
    value.as_object().cloned().expect("props fixture must be an object")
}
