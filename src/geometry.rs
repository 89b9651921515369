// src/geometry.rs
//! Coordinate, bounding box and shared-property helpers over record slices

use crate::error::{ExportError, Result};
use crate::record::{PositionalRecord, Props};
use serde::{Deserialize, Serialize};

/// `[lon, lat]` or `[lon, lat, alt]`
pub type Position = geojson::Position;

/// Axis-aligned box around a set of fixes.
///
/// 2d: `[west, south, east, north]`
///
/// 3d: `[west, south, min-altitude, east, north, max-altitude]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundingBox {
    Flat([f64; 4]),
    Elevated([f64; 6]),
}

impl BoundingBox {
    pub fn west(&self) -> f64 {
        match self {
            BoundingBox::Flat(b) => b[0],
            BoundingBox::Elevated(b) => b[0],
        }
    }

    pub fn south(&self) -> f64 {
        match self {
            BoundingBox::Flat(b) => b[1],
            BoundingBox::Elevated(b) => b[1],
        }
    }

    pub fn east(&self) -> f64 {
        match self {
            BoundingBox::Flat(b) => b[2],
            BoundingBox::Elevated(b) => b[3],
        }
    }

    pub fn north(&self) -> f64 {
        match self {
            BoundingBox::Flat(b) => b[3],
            BoundingBox::Elevated(b) => b[4],
        }
    }

    /// `(min, max)` altitude for 3d boxes
    pub fn altitude_range(&self) -> Option<(f64, f64)> {
        match self {
            BoundingBox::Flat(_) => None,
            BoundingBox::Elevated(b) => Some((b[2], b[5])),
        }
    }

    /// Midpoint of the box as `(longitude, latitude)`
    pub fn center(&self) -> (f64, f64) {
        (
            (self.west() + self.east()) / 2.0,
            (self.south() + self.north()) / 2.0,
        )
    }

    pub fn len(&self) -> usize {
        match self {
            BoundingBox::Flat(_) => 4,
            BoundingBox::Elevated(_) => 6,
        }
    }

    pub fn to_vec(&self) -> geojson::Bbox {
        match self {
            BoundingBox::Flat(b) => b.to_vec(),
            BoundingBox::Elevated(b) => b.to_vec(),
        }
    }
}

/// One position per record, in input order. Altitude is included when the
/// record carries one.
pub fn get_coords(records: &[PositionalRecord]) -> Vec<Position> {
    records.iter().map(position).collect()
}

pub fn position(record: &PositionalRecord) -> Position {
    let coords = &record.coords;
    match coords.altitude {
        Some(alt) => vec![coords.longitude, coords.latitude, alt],
        None => vec![coords.longitude, coords.latitude],
    }
}

/// Bounding box over all records in a single pass.
///
/// Dimensionality follows the first record: if it has an altitude the box is
/// 3d, and later records without one leave the altitude range untouched.
/// Returns `None` for an empty slice.
pub fn get_bbox(records: &[PositionalRecord]) -> Option<BoundingBox> {
    let first = records.first()?;

    if first.coords.has_altitude() {
        let mut result = [
            f64::INFINITY,
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        ];

        for record in records {
            let c = &record.coords;
            result[0] = result[0].min(c.longitude);
            result[1] = result[1].min(c.latitude);
            result[3] = result[3].max(c.longitude);
            result[4] = result[4].max(c.latitude);
            if let Some(alt) = c.altitude {
                result[2] = result[2].min(alt);
                result[5] = result[5].max(alt);
            }
        }

        Some(BoundingBox::Elevated(result))
    } else {
        let mut result = [
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        ];

        for record in records {
            let c = &record.coords;
            result[0] = result[0].min(c.longitude);
            result[1] = result[1].min(c.latitude);
            result[2] = result[2].max(c.longitude);
            result[3] = result[3].max(c.latitude);
        }

        Some(BoundingBox::Flat(result))
    }
}

/// Properties of the first record that has any
pub fn first_props(records: &[PositionalRecord]) -> Option<&Props> {
    records.iter().find_map(|record| record.props.as_ref())
}

/// Shared properties for a geometry built from many records: a copy of the
/// first record's properties found while scanning in order.
pub fn many_to_one_props(records: &[PositionalRecord]) -> Result<Props> {
    first_props(records).cloned().ok_or(ExportError::NoProperties)
}
