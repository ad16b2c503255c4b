//! Unit conversion tables.
//!
//! Capacities are expressed relative to bits per second and times relative
//! to milliseconds. Unit names are matched case-sensitively, exactly as
//! they appear in a topology's `capacity_unit` / `delay_unit` metadata.

/// Bits per second for each supported capacity unit
pub static CAPACITY_UNITS: &[(&str, f64)] = &[
    ("bit/sec", 1.0),
    ("bps", 1.0),
    ("b/s", 1.0),
    ("Kbit/sec", 1e3),
    ("Kbps", 1e3),
    ("kbps", 1e3),
    ("Kb/s", 1e3),
    ("kb/s", 1e3),
    ("Mbit/sec", 1e6),
    ("Mbps", 1e6),
    ("Mb/s", 1e6),
    ("Gbit/sec", 1e9),
    ("Gbps", 1e9),
    ("Gb/s", 1e9),
    ("Tbit/sec", 1e12),
    ("Tbps", 1e12),
    ("Tb/s", 1e12),
];

/// Milliseconds for each supported time unit
pub static TIME_UNITS: &[(&str, f64)] = &[
    ("minutes", 60_000.0),
    ("min", 60_000.0),
    ("m", 60_000.0),
    ("seconds", 1_000.0),
    ("sec", 1_000.0),
    ("s", 1_000.0),
    ("milliseconds", 1.0),
    ("millisec", 1.0),
    ("ms", 1.0),
    ("microseconds", 1e-3),
    ("microsec", 1e-3),
    ("us", 1e-3),
    ("nanoseconds", 1e-6),
    ("nanosec", 1e-6),
    ("ns", 1e-6),
];

fn lookup(table: &[(&str, f64)], unit: &str) -> Option<f64> {
    table
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|&(_, factor)| factor)
}

/// Bits per second represented by one `unit`, if the unit is known
///
/// # Examples
/// ```
/// use nedgen::units::capacity_factor;
///
/// assert_eq!(capacity_factor("Mbps"), Some(1_000_000.0));
/// assert_eq!(capacity_factor("furlongs"), None);
/// ```
pub fn capacity_factor(unit: &str) -> Option<f64> {
    lookup(CAPACITY_UNITS, unit)
}

/// Milliseconds represented by one `unit`, if the unit is known
///
/// # Examples
/// ```
/// use nedgen::units::time_factor;
///
/// assert_eq!(time_factor("s"), Some(1000.0));
/// assert_eq!(time_factor("ms"), Some(1.0));
/// ```
pub fn time_factor(unit: &str) -> Option<f64> {
    lookup(TIME_UNITS, unit)
}
