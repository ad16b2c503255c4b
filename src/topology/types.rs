//! Topology type definitions.
//!
//! A [`Topology`] is an ordered graph: nodes and edges keep the order in
//! which they were added, and that order drives node indexing and the
//! order of emitted connections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ExportError;

/// Graph metadata key naming the unit of edge capacities
pub const CAPACITY_UNIT_KEY: &str = "capacity_unit";

/// Graph metadata key naming the unit of edge delays
pub const DELAY_UNIT_KEY: &str = "delay_unit";

/// A link between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Propagation delay, in the topology's `delay_unit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    /// Link capacity, in the topology's `capacity_unit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            delay: None,
            capacity: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// True if this edge joins `u` and `v`, in either direction when `directed` is false
    fn joins(&self, u: &str, v: &str, directed: bool) -> bool {
        (self.source == u && self.target == v)
            || (!directed && self.source == v && self.target == u)
    }
}

/// A network topology with graph-level metadata
///
/// Deserialization goes through [`TopologyDocument`], so documents get the
/// same node deduplication and edge merging as [`Topology::add_edge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TopologyDocument")]
pub struct Topology {
    pub name: String,
    pub directed: bool,
    /// Graph-level metadata such as `capacity_unit` and `delay_unit`
    pub graph: BTreeMap<String, String>,
    pub(crate) nodes: Vec<String>,
    pub(crate) edges: Vec<Edge>,
}

/// Serde form of a topology file (JSON or YAML)
///
/// Graph metadata values may be any scalar; numbers and booleans are kept
/// as their textual form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopologyDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub graph: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
    }
}

impl TryFrom<TopologyDocument> for Topology {
    type Error = ExportError;

    /// Rebuild the topology node by node and edge by edge. Edges must only
    /// reference listed nodes.
    fn try_from(doc: TopologyDocument) -> Result<Self, Self::Error> {
        let mut topology = Topology {
            name: doc.name,
            directed: doc.directed,
            ..Topology::default()
        };

        for (key, value) in &doc.graph {
            match scalar_text(value) {
                Some(text) => {
                    topology.graph.insert(key.clone(), text);
                }
                None => log::debug!("Ignoring non-scalar graph attribute '{}'", key),
            }
        }

        for node in doc.nodes {
            if !topology.has_node(&node) {
                topology.add_node(node);
            } else {
                log::warn!("Duplicate node id '{}' in topology document", node);
            }
        }

        for edge in doc.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !topology.has_node(endpoint) {
                    return Err(ExportError::UnknownNode {
                        from: edge.source.clone(),
                        to: edge.target.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
            topology.add_edge(edge);
        }

        Ok(topology)
    }
}

impl Topology {
    /// Create an empty undirected topology
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an empty directed topology
    pub fn directed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directed: true,
            ..Self::default()
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn capacity_unit(&self) -> Option<&str> {
        self.graph.get(CAPACITY_UNIT_KEY).map(String::as_str)
    }

    pub fn delay_unit(&self) -> Option<&str> {
        self.graph.get(DELAY_UNIT_KEY).map(String::as_str)
    }

    pub fn set_capacity_unit(&mut self, unit: impl Into<String>) {
        self.graph.insert(CAPACITY_UNIT_KEY.to_string(), unit.into());
    }

    pub fn set_delay_unit(&mut self, unit: impl Into<String>) {
        self.graph.insert(DELAY_UNIT_KEY.to_string(), unit.into());
    }

    /// Add a node; returns false if it was already present
    pub fn add_node(&mut self, node: impl Into<String>) -> bool {
        let node = node.into();
        if self.has_node(&node) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn has_node(&self, node: &str) -> bool {
        self.nodes.iter().any(|n| n == node)
    }

    /// Add an edge, creating missing endpoints.
    ///
    /// An edge already joining the same endpoints has its attributes
    /// replaced and keeps its position.
    pub fn add_edge(&mut self, edge: Edge) {
        self.add_node(edge.source.as_str());
        self.add_node(edge.target.as_str());

        let directed = self.directed;
        match self
            .edges
            .iter_mut()
            .find(|e| e.joins(&edge.source, &edge.target, directed))
        {
            Some(existing) => {
                existing.delay = edge.delay;
                existing.capacity = edge.capacity;
                existing.attributes = edge.attributes;
            }
            None => self.edges.push(edge),
        }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_creates_nodes_in_order() {
        let mut topo = Topology::new("t");
        topo.add_edge(Edge::new("b", "a"));
        topo.add_edge(Edge::new("a", "c"));

        assert_eq!(topo.nodes(), &["b", "a", "c"]);
        assert_eq!(topo.edge_count(), 2);
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut topo = Topology::new("t");
        assert!(topo.add_node("x"));
        assert!(!topo.add_node("x"));
        assert_eq!(topo.node_count(), 1);
    }

    #[test]
    fn test_undirected_reverse_edge_updates_existing() {
        let mut topo = Topology::new("t");
        topo.add_edge(Edge::new("a", "b").with_delay(1.0));
        topo.add_edge(Edge::new("c", "a"));
        topo.add_edge(Edge::new("b", "a").with_delay(2.0));

        assert_eq!(topo.edge_count(), 2);
        assert_eq!(topo.edges()[0].source, "a");
        assert_eq!(topo.edges()[0].delay, Some(2.0));
    }

    #[test]
    fn test_directed_reverse_edge_is_distinct() {
        let mut topo = Topology::directed("t");
        topo.add_edge(Edge::new("a", "b"));
        topo.add_edge(Edge::new("b", "a"));

        assert!(topo.is_directed());
        assert_eq!(topo.edge_count(), 2);
    }

    #[test]
    fn test_unit_metadata() {
        let mut topo = Topology::new("t");
        assert_eq!(topo.capacity_unit(), None);
        assert_eq!(topo.delay_unit(), None);

        topo.set_capacity_unit("Mbps");
        topo.set_delay_unit("ms");

        assert_eq!(topo.capacity_unit(), Some("Mbps"));
        assert_eq!(topo.delay_unit(), Some("ms"));
        assert_eq!(topo.graph.get("capacity_unit"), Some(&"Mbps".to_string()));
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "name": "small",
            "directed": true,
            "graph": { "capacity_unit": "Gbps" },
            "nodes": ["r1", "r2"],
            "edges": [ { "source": "r1", "target": "r2", "capacity": 10 } ]
        }"#;

        let topo: Topology = serde_json::from_str(json).unwrap();
        assert_eq!(topo.name, "small");
        assert!(topo.is_directed());
        assert_eq!(topo.capacity_unit(), Some("Gbps"));
        assert_eq!(topo.edges()[0].capacity, Some(10.0));
        assert_eq!(topo.edges()[0].delay, None);
    }

    #[test]
    fn test_document_duplicate_nodes_are_merged() {
        let json = r#"{
            "directed": true,
            "nodes": ["a", "b", "a"],
            "edges": [ { "source": "a", "target": "b" } ]
        }"#;

        let topo: Topology = serde_json::from_str(json).unwrap();
        assert_eq!(topo.nodes(), &["a", "b"]);
        assert_eq!(topo.node_count(), 2);
        assert_eq!(topo.edge_count(), 1);
    }

    #[test]
    fn test_document_undirected_reverse_edge_is_merged() {
        let json = r#"{
            "nodes": ["a", "b"],
            "edges": [
                { "source": "a", "target": "b", "delay": 1 },
                { "source": "b", "target": "a", "delay": 3 }
            ]
        }"#;

        let topo: Topology = serde_json::from_str(json).unwrap();
        assert_eq!(topo.edge_count(), 1);
        assert_eq!(topo.edges()[0].source, "a");
        assert_eq!(topo.edges()[0].delay, Some(3.0));
    }

    #[test]
    fn test_document_with_dangling_edge() {
        let json = r#"{ "nodes": ["a"], "edges": [ { "source": "a", "target": "z" } ] }"#;

        let err = serde_json::from_str::<Topology>(json).unwrap_err();
        assert!(err.to_string().contains("unknown node 'z'"));
    }

    #[test]
    fn test_document_scalar_graph_metadata() {
        let json = r#"{
            "graph": { "delay_unit": "ms", "year": 2010, "rate": 0.5, "backbone": true,
                       "note": null, "tags": ["x"] },
            "nodes": []
        }"#;

        let topo: Topology = serde_json::from_str(json).unwrap();
        assert_eq!(topo.delay_unit(), Some("ms"));
        assert_eq!(topo.graph.get("year"), Some(&"2010".to_string()));
        assert_eq!(topo.graph.get("rate"), Some(&"0.5".to_string()));
        assert_eq!(topo.graph.get("backbone"), Some(&"true".to_string()));
        assert!(!topo.graph.contains_key("note"));
        assert!(!topo.graph.contains_key("tags"));
    }
}
