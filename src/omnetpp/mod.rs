//! # OMNeT++ NED export
//!
//! Turns a [`Topology`](crate::topology::Topology) into a NED script: a
//! placeholder node module plus a network whose connections mirror the
//! topology's edges.
//!
//! ## Example Generated Structure
//!
//! ```text
//! // Code generated by nedgen
//!
//! // Placeholder module for the nodes of the network
//! module node
//! {
//!     gates:
//!         inout ppg[];
//! }
//!
//! network My_Net_1
//! {
//!     submodules:
//!         node[2]: node;
//!     connections allowunconnected:
//!         node[0].ppg$o++ --> {delay=10ms; datarate=100Mbps;} --> node[1].ppg$i++;
//!         node[0].ppg$i++ <-- {delay=10ms; datarate=100Mbps;} <-- node[1].ppg$o++;
//! }
//! ```
//!
//! ## Units
//!
//! NED `delay` is written in milliseconds and `datarate` in Mbps. The
//! source units come from the topology's `delay_unit` and `capacity_unit`
//! metadata; when either is missing or unknown the matching attribute is
//! dropped and an [`Advisory`] is reported instead of an error.

pub mod convert;
pub mod ned;
pub mod options;

pub use convert::{convert, to_omnetpp, Advisory, Conversion, LinkQuantity, STDOUT_PATH};
pub use ned::{sanitize_network_name, Connection, LinkAttributes, NedScript};
pub use options::{load_options, NedOptions};
