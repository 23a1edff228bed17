//! Portal response fixtures.
//!
//! The chart lists records newest first, the way the portal does. The first
//! record is the current estimate month.

use serde_json::{json, Value};

pub const ACCOUNT_NUMBER: &str = "1234567890";
pub const ESTIMATE_MONTH: &str = "2024年06月";
pub const PREDICTION_MJ: f64 = 410.0;

pub fn account_json() -> Value {
    json!([ACCOUNT_NUMBER])
}

pub fn chart_json() -> Value {
    json!({
        "chartBarList": [
            {
                "strMonth1": ESTIMATE_MONTH,
                "consumption1": null,
                "strMonth2": "2023年06月",
                "consumption2": 388,
                "isEstimateMonth": true,
                "predictionConsumption": PREDICTION_MJ
            },
            {
                "strMonth1": "2024年04月",
                "consumption1": 402,
                "strMonth2": "2023年04月",
                "consumption2": "455",
                "isEstimateMonth": false,
                "predictionConsumption": null
            },
            {
                "strMonth1": "2024年02月",
                "consumption1": 560,
                "strMonth2": null,
                "consumption2": null,
                "isEstimateMonth": false,
                "predictionConsumption": 0
            }
        ]
    })
}

/// Reading labels `chart_json` produces, oldest first.
pub fn expected_reading_times() -> Vec<String> {
    ["2024年02月", "2023年04月", "2024年04月", ESTIMATE_MONTH, "2023年06月"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn billing_json() -> Value {
    json!({
        "list": [
            {"strBillDate": "2024-05-14", "total": "HK $123.00"},
            {"strBillDate": "2024-03-13", "total": "HK $98.00"}
        ]
    })
}

/// Second bill has a thousands separator, which the total parser rejects.
pub fn billing_with_separator_json() -> Value {
    json!({
        "list": [
            {"strBillDate": "2024-05-14", "total": "HK $123.00"},
            {"strBillDate": "2024-01-12", "total": "HK $1,234.00"}
        ]
    })
}

/// Test date generators.
pub mod dates {
    use chrono::{DateTime, Local, TimeZone};

    /// Creates a test date at noon (12:00:00).
    pub fn test_date_noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }
}
