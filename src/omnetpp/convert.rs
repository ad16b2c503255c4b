//! Topology to NED conversion.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::error::ExportError;
use crate::omnetpp::ned::{sanitize_network_name, Connection, LinkAttributes, NedScript};
use crate::omnetpp::options::NedOptions;
use crate::topology::{validate_topology, Edge, Topology};
use crate::units::{capacity_factor, time_factor};

/// Bits per second in one Mbps, the unit of NED `datarate`
const BPS_PER_MBPS: f64 = 1_000_000.0;

/// Which class of link attribute an advisory is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkQuantity {
    Capacity,
    Delay,
}

impl LinkQuantity {
    fn noun(self) -> &'static str {
        match self {
            Self::Capacity => "capacity",
            Self::Delay => "delay",
        }
    }
}

/// Non-fatal diagnostic: unit metadata was missing or not recognized, so the
/// matching attribute class was left out of the script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub quantity: LinkQuantity,
    /// The unrecognized unit, or None when the metadata was absent
    pub unit: Option<String>,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = self.quantity.noun();
        match &self.unit {
            None => write!(f, "Missing {noun} unit attribute in the topology")?,
            Some(unit) => write!(f, "Invalid {noun} unit '{unit}' in the topology")?,
        }
        write!(f, "; the output will be generated without link {noun} attributes")
    }
}

/// Result of a conversion: the script plus any advisories raised on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub script: String,
    pub advisories: Vec<Advisory>,
}

/// Look up a unit's factor, or describe why it cannot be used
fn resolve_unit(
    quantity: LinkQuantity,
    unit: Option<&str>,
    lookup: fn(&str) -> Option<f64>,
) -> Result<f64, Advisory> {
    match unit {
        None => Err(Advisory {
            quantity,
            unit: None,
        }),
        Some(u) => lookup(u).ok_or_else(|| Advisory {
            quantity,
            unit: Some(u.to_string()),
        }),
    }
}

fn unit_or_advise(
    quantity: LinkQuantity,
    unit: Option<&str>,
    lookup: fn(&str) -> Option<f64>,
    advisories: &mut Vec<Advisory>,
) -> Option<f64> {
    match resolve_unit(quantity, unit, lookup) {
        Ok(factor) => Some(factor),
        Err(advisory) => {
            warn!("{}", advisory);
            advisories.push(advisory);
            None
        }
    }
}

fn scaled(
    edge: &Edge,
    value: Option<f64>,
    norm: Option<f64>,
    attribute: &'static str,
) -> Result<Option<f64>, ExportError> {
    let Some(norm) = norm else {
        return Ok(None);
    };
    let value = value.ok_or_else(|| ExportError::MissingEdgeAttribute {
        from: edge.source.clone(),
        to: edge.target.clone(),
        attribute,
    })?;
    let normalized = norm * value;
    if !normalized.is_finite() {
        return Err(ExportError::NonFiniteAttribute {
            from: edge.source.clone(),
            to: edge.target.clone(),
            attribute,
            value: normalized,
        });
    }
    Ok(Some(normalized))
}

/// Convert a topology into a NED script.
///
/// Capacities are written in Mbps and delays in ms. When the topology's
/// `capacity_unit` or `delay_unit` is missing or unknown, the matching
/// attribute is left out of every connection and an [`Advisory`] is
/// returned (and logged) instead of failing. Undirected edges produce a
/// second, mirrored connection carrying the same attributes.
pub fn convert(topology: &Topology, options: &NedOptions) -> Result<Conversion, ExportError> {
    validate_topology(topology)?;

    let mut advisories = Vec::new();
    let capacity_norm = unit_or_advise(
        LinkQuantity::Capacity,
        topology.capacity_unit(),
        capacity_factor,
        &mut advisories,
    )
    .map(|bps| bps / BPS_PER_MBPS);
    let delay_norm = unit_or_advise(
        LinkQuantity::Delay,
        topology.delay_unit(),
        time_factor,
        &mut advisories,
    );

    let network = sanitize_network_name(options.network_name.as_deref().unwrap_or(&topology.name));

    let node_index: HashMap<&str, usize> = topology
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| (node.as_str(), i))
        .collect();

    let mut script = NedScript::new(options, network, topology.node_count());
    for edge in topology.edges() {
        let attributes = LinkAttributes {
            delay_ms: scaled(edge, edge.delay, delay_norm, "delay")?,
            datarate_mbps: scaled(edge, edge.capacity, capacity_norm, "capacity")?,
        };
        let clause = attributes.clause();
        // validate_topology guarantees both endpoints are indexed
        let (u, v) = (node_index[edge.source.as_str()], node_index[edge.target.as_str()]);

        script.push(Connection::forward(u, v, clause.clone()));
        if !topology.is_directed() {
            script.push(Connection::reverse(v, u, clause));
        }
    }

    debug!(
        "Network '{}': {} nodes, {} connections",
        script.network(),
        topology.node_count(),
        script.connections().len()
    );

    Ok(Conversion {
        script: script.to_string(),
        advisories,
    })
}

/// Path reported in I/O errors raised while writing to standard output
pub const STDOUT_PATH: &str = "<stdout>";

/// Write the whole script and flush, reporting failures against `path`
fn write_script(out: &mut impl Write, script: &str, path: &Path) -> Result<(), ExportError> {
    out.write_all(script.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| ExportError::io(path, e))
}

/// Convert a topology and write the script to `path`, or to standard
/// output when no path is given. An existing file is overwritten.
pub fn to_omnetpp(
    topology: &Topology,
    path: Option<&Path>,
    options: &NedOptions,
) -> Result<Conversion, ExportError> {
    let conversion = convert(topology, options)?;

    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
            write_script(&mut BufWriter::new(file), &conversion.script, path)?;
            info!("Wrote NED script to: {:?}", path);
        }
        None => write_script(&mut io::stdout().lock(), &conversion.script, Path::new(STDOUT_PATH))?,
    }

    Ok(conversion)
}
