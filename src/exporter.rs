// src/exporter.rs
//! Collection of positional records with load/dump and format dispatch

use crate::error::{ExportError, Result};
use crate::export::{geojson, gpx, kml, Export};
use crate::geometry::get_bbox;
use crate::options::{ExportFormat, ExportOptions};
use crate::params::GlobalParams;
use crate::record::PositionalRecord;
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Holds the records of one object (a point set, a line, ...) together with
/// the collection-level parameters.
///
/// Accessors hand out borrowed views; the collection owns its records and
/// nothing outside can mutate them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exporter {
    data: Vec<PositionalRecord>,
    global: GlobalParams,
}

#[derive(Serialize)]
struct DumpRef<'a> {
    data: &'a [PositionalRecord],
    global: &'a GlobalParams,
}

impl Exporter {
    pub fn new(global: GlobalParams) -> Self {
        Self {
            data: Vec::new(),
            global,
        }
    }

    pub fn data(&self) -> &[PositionalRecord] {
        &self.data
    }

    pub fn global(&self) -> &GlobalParams {
        &self.global
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn add(&mut self, record: PositionalRecord) {
        self.data.push(record);
    }

    /// Add a record given as JSON. It must carry a `coords` object.
    pub fn add_value(&mut self, value: serde_json::Value) -> Result<()> {
        if !value.get("coords").map_or(false, |c| c.is_object()) {
            return Err(ExportError::MissingFields(
                "cannot add without positional fields".to_string(),
            ));
        }
        let record: PositionalRecord = serde_json::from_value(value)?;
        self.add(record);
        Ok(())
    }

    /// Serialize records and global params for persistence
    pub fn dump(&self) -> Result<String> {
        let dump = DumpRef {
            data: &self.data,
            global: &self.global,
        };
        let text = serde_json::to_string(&dump)?;
        debug!(records = self.data.len(), bytes = text.len(), "dumped collection");
        Ok(text)
    }

    /// Rebuild a collection from [`Exporter::dump`] output
    pub fn load(dump: &str) -> Result<Self> {
        let mut parsed: serde_json::Value = serde_json::from_str(dump)?;

        let global = match parsed.get_mut("global").map(serde_json::Value::take) {
            Some(value) if value.is_object() => serde_json::from_value::<GlobalParams>(value)?,
            _ => return Err(ExportError::Load("missing data".to_string())),
        };

        let mut exporter = Exporter::new(global);
        match parsed.get_mut("data").map(serde_json::Value::take) {
            Some(serde_json::Value::Array(items)) => {
                for item in items {
                    exporter.add_value(item)?;
                }
            }
            None => {}
            Some(_) => return Err(ExportError::Load("data is not an array".to_string())),
        }

        debug!(records = exporter.len(), "loaded collection");
        Ok(exporter)
    }

    /// Export as points: waypoints (GPX), placemarks (KML) or a
    /// Point/MultiPoint flavoured object (GeoJSON)
    pub fn to_point(&self, format: ExportFormat, options: &ExportOptions) -> Result<Export> {
        let (data, options) = self.prepare(options);

        match format {
            ExportFormat::GeoJson => Ok(Export::GeoJson(geojson::to_point(&data, &self.global, &options)?)),
            ExportFormat::Gpx => Ok(Export::Xml(gpx::to_waypoints(&data, &self.global, &options))),
            ExportFormat::Kml => Ok(Export::Xml(kml::to_placemarks(&data, &self.global, &options)?)),
        }
    }

    /// Export as a line: LineString (GeoJSON), track or route (GPX), line
    /// placemark (KML)
    pub fn to_line(&self, format: ExportFormat, options: &ExportOptions) -> Result<Export> {
        let (data, options) = self.prepare(options);

        match format {
            ExportFormat::GeoJson => Ok(Export::GeoJson(geojson::to_line_string(&data, &self.global, &options)?)),
            ExportFormat::Gpx => Ok(Export::Xml(gpx::to_track(&data, &self.global, &options)?)),
            ExportFormat::Kml => Ok(Export::Xml(kml::to_line_placemark(&data, &self.global, &options)?)),
        }
    }

    /// Export as a Polygon. GeoJSON only.
    pub fn to_polygon(&self, format: ExportFormat, options: &ExportOptions) -> Result<Export> {
        let (data, options) = self.prepare(options);

        match format {
            ExportFormat::GeoJson => Ok(Export::GeoJson(geojson::to_polygon(&data, &self.global, &options)?)),
            ExportFormat::Gpx | ExportFormat::Kml => Err(ExportError::Unsupported(format!(
                "polygons cannot be exported as {}",
                format.display_name()
            ))),
        }
    }

    /// Flatten if requested and compute the bounding box once. The caller's
    /// options are left as they were.
    fn prepare(&self, options: &ExportOptions) -> (Cow<'_, [PositionalRecord]>, ExportOptions) {
        let data: Cow<'_, [PositionalRecord]> = if options.flatten {
            trace!("flattening {} records", self.data.len());
            Cow::Owned(self.data.iter().map(PositionalRecord::flatten).collect())
        } else {
            Cow::Borrowed(&self.data)
        };

        let mut prepared = options.clone();
        if prepared.bbox && prepared.bounds.is_none() {
            prepared.bounds = get_bbox(&data);
        }

        (data, prepared)
    }
}
