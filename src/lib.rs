//! # nedgen - Export network topologies to OMNeT++ NED scripts
//!
//! This library converts a network topology (nodes, edges, per-edge delay
//! and capacity) into a NED network description that the OMNeT++
//! discrete-event simulator can load.
//!
//! ## Architecture
//!
//! - `topology`: in-memory topology model, file loaders and validation
//! - `gml_parser`: GML reader used by the topology loader
//! - `units`: capacity and time unit tables
//! - `omnetpp`: NED script generation and output
//! - `error`: error type shared by all of the above
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nedgen::omnetpp::{to_omnetpp, NedOptions};
//! use nedgen::topology::load_topology;
//! use std::path::Path;
//!
//! let topology = load_topology(Path::new("topology.gml"))?;
//! let conversion = to_omnetpp(&topology, Some(Path::new("topology.ned")), &NedOptions::default())?;
//! for advisory in &conversion.advisories {
//!     eprintln!("warning: {}", advisory);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Topology Files
//!
//! GML files follow the layout written by common graph libraries:
//!
//! ```text
//! graph [
//!   name "Example"
//!   capacity_unit "Mbps"
//!   delay_unit "ms"
//!   node [ id 0 ]
//!   node [ id 1 ]
//!   edge [ source 0 target 1 delay 10 capacity 100 ]
//! ]
//! ```
//!
//! JSON and YAML files are the serde form of [`topology::Topology`].
//!
//! ## Error Handling
//!
//! Library functions return `Result<T, error::ExportError>`. Missing or
//! unknown unit metadata is not an error: it is reported through
//! [`omnetpp::Advisory`] values and `log` warnings.

pub mod error;
pub mod gml_parser;
pub mod omnetpp;
pub mod topology;
pub mod units;

pub use error::ExportError;
