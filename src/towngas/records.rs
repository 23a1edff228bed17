use serde_derive::Serialize;
use std::fmt;

use super::history::Keyed;

/// Vendor-assigned account identifier, resolved on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountNumber(pub String);

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AccountNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One monthly reading, exposed in the sensor's `readings` attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Month label as the portal prints it
    pub time: String,
    /// Energy in megajoules
    #[serde(rename = "mj")]
    pub energy: f64,
    pub estimated: bool,
}

impl Keyed for Reading {
    fn key(&self) -> &str {
        &self.time
    }
}

/// One issued bill, exposed in the sensor's `bills` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bill {
    pub time: String,
    /// Whole Hong Kong dollars
    pub total: i64,
}

impl Keyed for Bill {
    fn key(&self) -> &str {
        &self.time
    }
}
