use serde_json::Value;

use super::records::{AccountNumber, Bill, Reading};
use super::response::{BillRecord, ChartBarRecord, Quantity};
use crate::error::ParseError;

const CURRENCY_PREFIX: &str = "HK $";
const CENTS_SUFFIX: &str = ".00";

/// Readings extracted from one chart response.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChartReadings {
    /// Oldest first
    pub readings: Vec<Reading>,
    /// Prediction of the last estimate-month record, if any
    pub latest: Option<f64>,
}

/// Picks the account number out of the account lookup response.
pub fn account_number(accounts: &[Value]) -> Result<AccountNumber, ParseError> {
    match accounts.first() {
        Some(Value::String(number)) if number.is_empty() => Err(ParseError::UnexpectedStructure(
            "account number is an empty string".to_string(),
        )),
        Some(Value::String(number)) => Ok(AccountNumber(number.clone())),
        Some(Value::Number(number)) => Ok(AccountNumber(number.to_string())),
        Some(other) => Err(ParseError::UnexpectedStructure(format!(
            "account number is not a string or number: {}",
            other
        ))),
        None => Err(ParseError::EmptyAccountList),
    }
}

/// Builds readings from chart records.
///
/// Records arrive newest first. Each record contributes its first month, its
/// second month and, for estimate months, the prediction for the first month
/// (which also becomes the latest value). The result is reversed so it reads
/// oldest to newest.
pub fn readings_from_chart(records: &[ChartBarRecord]) -> Result<ChartReadings, ParseError> {
    let mut chart = ChartReadings::default();

    for record in records {
        let month1 = label(&record.str_month1);

        if let (Some(time), Some(energy)) = (month1, quantity(&record.consumption1)?) {
            chart.readings.push(Reading {
                time: time.to_string(),
                energy,
                estimated: false,
            });
        }

        if let (Some(time), Some(energy)) =
            (label(&record.str_month2), quantity(&record.consumption2)?)
        {
            chart.readings.push(Reading {
                time: time.to_string(),
                energy,
                estimated: false,
            });
        }

        if is_truthy(&record.is_estimate_month) {
            if let (Some(time), Some(energy)) =
                (month1, quantity(&record.prediction_consumption)?)
            {
                chart.readings.push(Reading {
                    time: time.to_string(),
                    energy,
                    estimated: true,
                });
                chart.latest = Some(energy);
            }
        }
    }

    chart.readings.reverse();
    Ok(chart)
}

/// Parses a bill total such as "HK $123.00" into whole dollars.
///
/// Only the currency prefix and the ".00" suffix are removed; thousands
/// separators are not, so "HK $1,234.00" is rejected.
pub fn parse_bill_total(text: &str) -> Result<i64, ParseError> {
    let digits = text.replace(CURRENCY_PREFIX, "").replace(CENTS_SUFFIX, "");
    digits
        .trim()
        .parse::<i64>()
        .map_err(|e| ParseError::number_parse(text, e))
}

/// Builds bills oldest first; the portal lists them newest first.
pub fn bills_from_billing(records: &[BillRecord]) -> Result<Vec<Bill>, ParseError> {
    records
        .iter()
        .rev()
        .map(|record| {
            Ok(Bill {
                time: record.str_bill_date.clone(),
                total: parse_bill_total(&record.total)?,
            })
        })
        .collect()
}

fn label(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// Absent, empty and zero all mean "no value" on the portal.
fn quantity(value: &Option<Quantity>) -> Result<Option<f64>, ParseError> {
    let number = match value {
        None => return Ok(None),
        Some(Quantity::Number(number)) => *number,
        Some(Quantity::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>()
                .map_err(|e| ParseError::number_parse(text, e))?
        }
    };
    Ok((number != 0.0).then_some(number))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty() && !text.eq_ignore_ascii_case("false"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
