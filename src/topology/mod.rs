//! Network topology module.
//!
//! This module contains the in-memory topology model and the functions
//! that load it from topology files and check it before export.

pub mod loader;
pub mod types;
pub mod validation;

// Re-export key types and functions for easier access
pub use loader::{load_topology, topology_from_gml};
pub use types::{Edge, Topology, TopologyDocument, CAPACITY_UNIT_KEY, DELAY_UNIT_KEY};
pub use validation::validate_topology;
