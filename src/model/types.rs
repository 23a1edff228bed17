use std::fmt;

/// Represents the type of measurement being collected.
///
/// Each measurement type corresponds to a different InfluxDB measurement
/// (table) where the data will be stored.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Measurement {
    /// Latest (estimated) gas usage, the sensor's state
    GasUsage,
    /// Monthly meter readings
    GasReading,
    /// Issued bills
    GasBill,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Measurement::GasUsage => write!(f, "gas_usage"),
            Measurement::GasReading => write!(f, "gas_reading"),
            Measurement::GasBill => write!(f, "gas_bill"),
        }
    }
}

/// Units of measurement used in the system.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Unit {
    /// Megajoules (MJ) - gas energy as metered by the utility
    Megajoule,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Unit::Megajoule => write!(f, "MJ"),
        }
    }
}

/// How the host should interpret the sensor's value.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeviceClass {
    Gas,
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeviceClass::Gas => write!(f, "gas"),
        }
    }
}

/// Whether the value is a running total or an instantaneous measurement.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StateClass {
    /// Cumulative total that may reset at any time (e.g. per billing period)
    Total,
}

impl fmt::Display for StateClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateClass::Total => write!(f, "total"),
        }
    }
}
