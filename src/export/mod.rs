// src/export/mod.rs
//! Format emitters and their shared output type

pub mod geojson;
pub mod gpx;
pub mod kml;

use crate::error::Result;
use crate::xml::XmlNode;
use std::fmt;

/// Result of an export: the structure itself, convertible to text
#[derive(Debug, Clone, PartialEq)]
pub enum Export {
    GeoJson(::geojson::GeoJson),
    Xml(XmlNode),
}

impl Export {
    pub fn as_geojson(&self) -> Option<&::geojson::GeoJson> {
        match self {
            Export::GeoJson(value) => Some(value),
            Export::Xml(_) => None,
        }
    }

    pub fn as_xml(&self) -> Option<&XmlNode> {
        match self {
            Export::GeoJson(_) => None,
            Export::Xml(node) => Some(node),
        }
    }

    pub fn into_geojson(self) -> Option<::geojson::GeoJson> {
        match self {
            Export::GeoJson(value) => Some(value),
            Export::Xml(_) => None,
        }
    }

    pub fn into_xml(self) -> Option<XmlNode> {
        match self {
            Export::GeoJson(_) => None,
            Export::Xml(node) => Some(node),
        }
    }

    /// Serialize to text, indented when `pretty` is set
    pub fn to_text(&self, pretty: bool) -> Result<String> {
        match self {
            Export::GeoJson(value) if pretty => Ok(serde_json::to_string_pretty(value)?),
            Export::GeoJson(value) => Ok(serde_json::to_string(value)?),
            Export::Xml(node) => node.to_document(pretty),
        }
    }

    pub fn to_string_pretty(&self) -> Result<String> {
        self.to_text(true)
    }
}

impl fmt::Display for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_text(false).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
