//! Rendering options for generated NED scripts.

use std::fs::File;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Options controlling the shape of the generated NED script
///
/// Every field has a default, so an options file only needs to list
/// the values it changes:
///
/// ```yaml
/// node_module: router
/// gate: port
/// network_name: backbone
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NedOptions {
    /// Module type of every node, also used as the submodule vector name
    pub node_module: String,
    /// Inout gate vector connecting nodes
    pub gate: String,
    /// Overrides the topology name; sanitized like a topology name
    pub network_name: Option<String>,
    /// First line of the script, emitted as a `//` comment
    pub header: String,
}

impl Default for NedOptions {
    fn default() -> Self {
        Self {
            node_module: "node".to_string(),
            gate: "ppg".to_string(),
            network_name: None,
            header: "Code generated by nedgen".to_string(),
        }
    }
}

/// Load rendering options from a YAML file
pub fn load_options(path: &Path) -> Result<NedOptions, ExportError> {
    info!("Loading NED options from: {:?}", path);

    let file = File::open(path).map_err(|e| ExportError::io(path, e))?;
    let options: NedOptions = serde_yaml::from_reader(file)?;

    Ok(options)
}
