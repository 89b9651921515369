// src/lib.rs
//! Location Export Library
//!
//! Converts raw positional fixes into GeoJSON, GPX and KML. Records are
//! collected in an [`Exporter`] and exported as points or as a line.

pub mod config;
pub mod error;
pub mod export;
pub mod exporter;
pub mod geometry;
pub mod options;
pub mod params;
pub mod record;
pub mod validate;
pub mod xml;

// Re-export main types for convenience
pub use error::{ExportError, Result};
pub use export::Export;
pub use exporter::Exporter;
pub use geometry::{get_bbox, get_coords, many_to_one_props, BoundingBox};
pub use options::{ExportFormat, ExportOptions, Wrapper};
pub use params::{Copyright, GlobalParams, Link, Metadata, Person};
pub use record::{Coords, PositionalRecord, Props, RecordId};
pub use xml::XmlNode;
