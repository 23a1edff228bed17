//! Wire shapes of the portal's JSON responses.
//!
//! The portal is loosely typed: numbers sometimes arrive as strings and
//! flags as anything truthy, so those fields are kept close to the wire and
//! interpreted in `parsing`.

use serde_derive::Deserialize;
use serde_json::Value;

/// A numeric field that may be sent as a JSON number or as text.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

/// Response of `GetMeterReadingInfoForChat`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MeterReadingResponse {
    pub chart_bar_list: Vec<ChartBarRecord>,
}

/// One bar of the usage chart; each bar covers up to two months.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChartBarRecord {
    pub str_month1: Option<String>,
    pub consumption1: Option<Quantity>,
    pub str_month2: Option<String>,
    pub consumption2: Option<Quantity>,
    #[serde(default)]
    pub is_estimate_month: Value,
    pub prediction_consumption: Option<Quantity>,
}

/// Response of `GetEBillingInfo`.
#[derive(Deserialize, Debug)]
pub struct BillingResponse {
    pub list: Vec<BillRecord>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub str_bill_date: String,
    /// Formatted like "HK $123.00"
    pub total: String,
}
