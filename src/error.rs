//! Error types shared by the loaders and the NED exporter.

use std::path::PathBuf;

use crate::gml_parser::GmlParseError;

/// Errors that can occur while loading a topology or exporting it
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid GML topology: {0}")]
    Gml(#[from] GmlParseError),

    #[error("Invalid JSON topology: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported topology format '{extension}' (expected gml, json, yaml or yml)")]
    UnsupportedFormat { extension: String },

    #[error("Edge {from} -> {to} references unknown node '{node}'")]
    UnknownNode {
        from: String,
        to: String,
        node: String,
    },

    #[error("Edge {from} -> {to} has no '{attribute}' attribute")]
    MissingEdgeAttribute {
        from: String,
        to: String,
        attribute: &'static str,
    },

    #[error("Edge {from} -> {to} has a non-finite '{attribute}' after normalization ({value})")]
    NonFiniteAttribute {
        from: String,
        to: String,
        attribute: &'static str,
        value: f64,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
