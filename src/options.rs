// src/options.rs
//! Output formats and per-call export options

use crate::error::{ExportError, Result};
use crate::geometry::{get_bbox, BoundingBox};
use crate::record::PositionalRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    GeoJson,
    Gpx,
    Kml,
}

impl ExportFormat {
    pub fn extension(&self) -> &str {
        match self {
            ExportFormat::GeoJson => "geojson",
            ExportFormat::Gpx => "gpx",
            ExportFormat::Kml => "kml",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ExportFormat::GeoJson => "GeoJSON",
            ExportFormat::Gpx => "GPX (GPS Exchange)",
            ExportFormat::Kml => "KML (Keyhole)",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    /// Case-insensitive format keyword
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "geojson" => Ok(ExportFormat::GeoJson),
            "gpx" => Ok(ExportFormat::Gpx),
            "kml" => Ok(ExportFormat::Kml),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How GeoJSON output is wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wrapper {
    /// Feature or FeatureCollection
    #[default]
    Feature,
    /// Bare geometry, GeometryCollection for several points
    Geometry,
    /// Bare geometry, nothing attached
    None,
}

impl Wrapper {
    /// Geometry and None both drop feature-level members
    pub fn is_bare(&self) -> bool {
        !matches!(self, Wrapper::Feature)
    }
}

impl FromStr for Wrapper {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "feature" => Ok(Wrapper::Feature),
            "geometry" => Ok(Wrapper::Geometry),
            "none" => Ok(Wrapper::None),
            _ => Err(ExportError::Other(format!("Unknown wrapper: {}", s))),
        }
    }
}

impl fmt::Display for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Wrapper::Feature => "feature",
            Wrapper::Geometry => "geometry",
            Wrapper::None => "none",
        };
        f.write_str(name)
    }
}

/// Options for a single export call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    /// Drop altitude before exporting
    pub flatten: bool,
    /// Attach a bounding box
    pub bbox: bool,
    /// Precomputed box, attached whether or not `bbox` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
    /// GeoJSON only
    pub wrapper: Wrapper,
    /// GeoJSON only
    pub multi_point: bool,
    /// GPX only: lines become a route instead of a track
    pub route: bool,
    /// KML only: placemark name for lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// `bounds` if given, else the computed box when `bbox` is set
    pub fn resolve_bbox(&self, records: &[PositionalRecord]) -> Option<BoundingBox> {
        self.bounds
            .or_else(|| self.bbox.then(|| get_bbox(records)).flatten())
    }
}
