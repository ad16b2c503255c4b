//! Structural checks run before a topology is exported.

use std::collections::HashSet;

use crate::error::ExportError;
use crate::topology::types::Topology;

/// Validate the network topology
///
/// Checks that every edge endpoint is a known node. Isolated nodes are
/// allowed (the exported network is declared `allowunconnected`) but
/// logged, since they usually point at an incomplete topology file.
///
/// # Examples
/// ```
/// use nedgen::topology::{validate_topology, Edge, Topology};
///
/// let mut topo = Topology::new("t");
/// topo.add_edge(Edge::new("a", "b"));
/// assert!(validate_topology(&topo).is_ok());
/// ```
pub fn validate_topology(topology: &Topology) -> Result<(), ExportError> {
    let nodes: HashSet<&str> = topology.nodes().iter().map(String::as_str).collect();
    let mut connected = HashSet::new();

    for edge in topology.edges() {
        for endpoint in [&edge.source, &edge.target] {
            if !nodes.contains(endpoint.as_str()) {
                return Err(ExportError::UnknownNode {
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                    node: endpoint.clone(),
                });
            }
            connected.insert(endpoint.as_str());
        }
    }

    let isolated = nodes.len() - connected.len();
    if isolated > 0 && topology.node_count() > 1 {
        log::warn!(
            "Topology '{}' has {} isolated node(s) out of {}",
            topology.name,
            isolated,
            topology.node_count()
        );
    }

    Ok(())
}
