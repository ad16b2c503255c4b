//! Topology loading.
//!
//! Builds a [`Topology`] from a GML, JSON or YAML file. The format is
//! chosen from the file extension.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::ExportError;
use crate::gml_parser::{parse_gml_file, GmlEdge, GmlGraph, GmlParseError};
use crate::topology::types::{Edge, Topology, TopologyDocument};
use crate::topology::validation::validate_topology;

/// Load a topology from disk, dispatching on the file extension
pub fn load_topology(path: &Path) -> Result<Topology, ExportError> {
    info!("Loading topology from: {:?}", path);

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let topology = match extension.as_str() {
        "gml" => topology_from_gml(parse_gml_file(path)?)?,
        "json" => {
            let file = File::open(path).map_err(|e| ExportError::io(path, e))?;
            let doc: TopologyDocument = serde_json::from_reader(BufReader::new(file))?;
            Topology::try_from(doc)?
        }
        "yaml" | "yml" => {
            let file = File::open(path).map_err(|e| ExportError::io(path, e))?;
            let doc: TopologyDocument = serde_yaml::from_reader(BufReader::new(file))?;
            Topology::try_from(doc)?
        }
        _ => return Err(ExportError::UnsupportedFormat { extension }),
    };

    validate_topology(&topology)?;

    info!(
        "Loaded topology '{}': {} nodes, {} edges ({})",
        topology.name,
        topology.node_count(),
        topology.edge_count(),
        if topology.is_directed() { "directed" } else { "undirected" }
    );
    Ok(topology)
}

fn numeric(edge: &GmlEdge, key: &str) -> Result<Option<f64>, GmlParseError> {
    edge.scalar(key)
        .map(|raw| {
            raw.trim().parse::<f64>().map_err(|_| GmlParseError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
            })
        })
        .transpose()
}

/// Convert a parsed GML graph into a [`Topology`]
///
/// Graph `name` (falling back to `label`) becomes the topology name,
/// `directed` selects directedness and every other scalar graph attribute
/// is kept as metadata. Edge `delay` and `capacity` must be numeric.
pub fn topology_from_gml(graph: GmlGraph) -> Result<Topology, ExportError> {
    let name = graph
        .scalar("name")
        .or_else(|| graph.scalar("label"))
        .unwrap_or_default()
        .to_string();

    let mut topology = if graph.is_directed() {
        Topology::directed(name)
    } else {
        Topology::new(name)
    };

    for (key, value) in &graph.attributes {
        if matches!(key.as_str(), "name" | "label" | "directed") {
            continue;
        }
        match value.as_scalar() {
            Some(v) => {
                topology.graph.insert(key.clone(), v.to_string());
            }
            None => debug!("Ignoring nested graph attribute '{}'", key),
        }
    }

    for node in &graph.nodes {
        if !topology.add_node(node.id.as_str()) {
            warn!("Duplicate node id '{}' in GML graph", node.id);
        }
    }

    for gml_edge in &graph.edges {
        for endpoint in [&gml_edge.source, &gml_edge.target] {
            if !topology.has_node(endpoint) {
                return Err(ExportError::UnknownNode {
                    from: gml_edge.source.clone(),
                    to: gml_edge.target.clone(),
                    node: endpoint.clone(),
                });
            }
        }

        let mut edge = Edge::new(gml_edge.source.as_str(), gml_edge.target.as_str());
        edge.delay = numeric(gml_edge, "delay")?;
        edge.capacity = numeric(gml_edge, "capacity")?;
        edge.attributes = gml_edge
            .attributes
            .iter()
            .filter(|(k, _)| k != "delay" && k != "capacity")
            .filter_map(|(k, v)| v.as_scalar().map(|v| (k.clone(), v.to_string())))
            .collect();
        topology.add_edge(edge);
    }

    Ok(topology)
}
