//! NED script assembly.
//!
//! [`NedScript`] holds everything needed to print a network description:
//! a sanitized network name, the node count and the ordered connection
//! statements. Printing goes through its `Display` impl.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::omnetpp::options::NedOptions;

/// Network name used when a topology has no usable name
pub const DEFAULT_NETWORK_NAME: &str = "net";

fn non_alphanumeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[^A-Za-z0-9]+").expect("static regex is valid"))
}

/// Turn a topology name into a NED identifier.
///
/// Runs of characters outside `[A-Za-z0-9]` become a single `_`, then
/// leading and trailing `_` and spaces are stripped. Empty input (or input
/// with no alphanumeric characters) yields `net`. A leading digit is not
/// rewritten.
///
/// # Examples
/// ```
/// use nedgen::omnetpp::sanitize_network_name;
///
/// assert_eq!(sanitize_network_name(""), "net");
/// assert_eq!(sanitize_network_name("My Net #1"), "My_Net_1");
/// ```
pub fn sanitize_network_name(name: &str) -> String {
    if name.is_empty() {
        return DEFAULT_NETWORK_NAME.to_string();
    }
    let replaced = non_alphanumeric().replace_all(name, "_");
    let trimmed = replaced.trim_matches(|c: char| c == '_' || c == ' ');
    if trimmed.is_empty() {
        DEFAULT_NETWORK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a quantity without exponent or trailing `.0`
///
/// `value` must be finite; `inf` and `NaN` are not NED literals and
/// conversion rejects them before formatting.
pub fn format_quantity(value: f64) -> String {
    format!("{}", value)
}

/// Channel parameters of one link, already normalized
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinkAttributes {
    pub delay_ms: Option<f64>,
    pub datarate_mbps: Option<f64>,
}

impl LinkAttributes {
    /// Channel body such as `delay=10ms; datarate=100Mbps;`, empty if no
    /// parameter is set
    pub fn clause(&self) -> String {
        let mut clause = String::new();
        if let Some(delay) = self.delay_ms {
            clause.push_str(&format!(" delay={}ms;", format_quantity(delay)));
        }
        if let Some(rate) = self.datarate_mbps {
            clause.push_str(&format!(" datarate={}Mbps;", format_quantity(rate)));
        }
        clause.trim().to_string()
    }
}

/// One port-to-port link between indexed nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Index of the node whose output gate starts the link
    pub from: usize,
    /// Index of the node whose input gate ends the link
    pub to: usize,
    pub clause: String,
    /// Written right-to-left (`<--`), used for the reverse half of an
    /// undirected edge
    pub reversed: bool,
}

impl Connection {
    pub fn forward(from: usize, to: usize, clause: impl Into<String>) -> Self {
        Self {
            from,
            to,
            clause: clause.into(),
            reversed: false,
        }
    }

    /// Link from `from`'s output gate to `to`'s input gate, written with `to` first
    pub fn reverse(from: usize, to: usize, clause: impl Into<String>) -> Self {
        Self {
            from,
            to,
            clause: clause.into(),
            reversed: true,
        }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, module: &str, gate: &str) -> fmt::Result {
        let (left, right, arrow) = if self.reversed {
            (format!("{module}[{}].{gate}$i++", self.to), format!("{module}[{}].{gate}$o++", self.from), "<--")
        } else {
            (format!("{module}[{}].{gate}$o++", self.from), format!("{module}[{}].{gate}$i++", self.to), "-->")
        };
        if self.clause.is_empty() {
            write!(f, "{left} {arrow} {right};")
        } else {
            write!(f, "{left} {arrow} {{{}}} {arrow} {right};", self.clause)
        }
    }
}

/// A complete NED network description
#[derive(Debug, Clone)]
pub struct NedScript<'a> {
    options: &'a NedOptions,
    network: String,
    node_count: usize,
    connections: Vec<Connection>,
}

impl<'a> NedScript<'a> {
    pub fn new(options: &'a NedOptions, network: impl Into<String>, node_count: usize) -> Self {
        Self {
            options,
            network: network.into(),
            node_count,
            connections: Vec::new(),
        }
    }

    pub fn push(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }
}

impl fmt::Display for NedScript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let module = self.options.node_module.as_str();
        let gate = self.options.gate.as_str();

        writeln!(f, "// {}", self.options.header)?;
        writeln!(f)?;
        writeln!(f, "// Placeholder module for the nodes of the network")?;
        writeln!(f, "module {module}")?;
        writeln!(f, "{{")?;
        writeln!(f, "    gates:")?;
        writeln!(f, "        inout {gate}[];")?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "network {}", self.network)?;
        writeln!(f, "{{")?;
        writeln!(f, "    submodules:")?;
        writeln!(f, "        {module}[{}]: {module};", self.node_count)?;
        writeln!(f, "    connections allowunconnected:")?;
        for connection in &self.connections {
            write!(f, "        ")?;
            connection.write(f, module, gate)?;
            writeln!(f)?;
        }
        writeln!(f, "}}")
    }
}
