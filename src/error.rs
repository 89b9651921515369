// src/error.rs
//! Error types for the exporters

use std::fmt;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Xml(quick_xml::Error),
    /// A geometry needs more positions than it was given
    TooFewPositions { geometry: &'static str, required: usize, found: usize },
    MissingFields(String),
    UnknownFormat(String),
    Unsupported(String),
    NoProperties,
    Load(String),
    Other(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Json(e) => write!(f, "JSON error: {}", e),
            ExportError::Xml(e) => write!(f, "XML error: {}", e),
            ExportError::TooFewPositions { geometry: "Polygon", required, found } => write!(
                f,
                "Polygons need at least four positions (need {}, got {})",
                required, found
            ),
            ExportError::TooFewPositions { geometry, required, found } => write!(
                f,
                "{} coordinates must be an array of two or more positions (need {}, got {})",
                geometry, required, found
            ),
            ExportError::MissingFields(msg) => write!(f, "Missing fields: {}", msg),
            ExportError::UnknownFormat(format) => write!(f, "Unknown format: {}", format),
            ExportError::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            ExportError::NoProperties => write!(f, "No properties found"),
            ExportError::Load(msg) => write!(f, "Unable to load: {}", msg),
            ExportError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(e) => Some(e),
            ExportError::Json(e) => Some(e),
            ExportError::Xml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(error: std::io::Error) -> Self {
        ExportError::Io(error)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(error: serde_json::Error) -> Self {
        ExportError::Json(error)
    }
}

impl From<quick_xml::Error> for ExportError {
    fn from(error: quick_xml::Error) -> Self {
        ExportError::Xml(error)
    }
}

impl From<anyhow::Error> for ExportError {
    fn from(error: anyhow::Error) -> Self {
        ExportError::Other(error.to_string())
    }
}
