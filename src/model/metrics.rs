use crate::error::{Result, StorageError};
use chrono::{DateTime, Local};
use influxdb2::models::DataPoint;

use super::traits::DataPointBuilder;
use super::types::Measurement;

fn timestamp_nanos(timestamp: &DateTime<Local>) -> Result<i64, StorageError> {
    timestamp
        .timestamp_nanos_opt()
        .ok_or_else(|| StorageError::InvalidDataPoint("Timestamp overflow".to_string()))
}

/// The sensor's current value: the latest estimated-month prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct GasUsageMetric {
    /// Sensor display name
    pub sensor: String,
    /// Energy in megajoules (MJ)
    pub value: f64,
    pub timestamp: DateTime<Local>,
}

impl DataPointBuilder for GasUsageMetric {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        DataPoint::builder(Measurement::GasUsage.to_string().as_str())
            .tag("sensor", self.sensor.clone())
            .field("value", self.value)
            .timestamp(timestamp_nanos(&self.timestamp)?)
            .build()
            .map_err(|e| {
                StorageError::InvalidDataPoint(format!("Failed to build GasUsageMetric: {}", e))
            })
    }
}

/// One monthly meter reading from the usage chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GasReadingMetric {
    pub sensor: String,
    /// Month label as shown by the portal (e.g., "2024年05月")
    pub month: String,
    /// Energy in megajoules (MJ)
    pub value: f64,
    /// Whether the value is the portal's prediction rather than a metered figure
    pub estimated: bool,
    pub timestamp: DateTime<Local>,
}

impl DataPointBuilder for GasReadingMetric {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        DataPoint::builder(Measurement::GasReading.to_string().as_str())
            .tag("sensor", self.sensor.clone())
            .tag("month", self.month.clone())
            .field("value", self.value)
            .field("estimated", self.estimated)
            .timestamp(timestamp_nanos(&self.timestamp)?)
            .build()
            .map_err(|e| {
                StorageError::InvalidDataPoint(format!("Failed to build GasReadingMetric: {}", e))
            })
    }
}

/// One issued bill.
#[derive(Debug, Clone, PartialEq)]
pub struct GasBillMetric {
    pub sensor: String,
    pub bill_date: String,
    /// Bill total in whole Hong Kong dollars
    pub total: i64,
    pub timestamp: DateTime<Local>,
}

impl DataPointBuilder for GasBillMetric {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        DataPoint::builder(Measurement::GasBill.to_string().as_str())
            .tag("sensor", self.sensor.clone())
            .tag("bill_date", self.bill_date.clone())
            .field("total", self.total)
            .timestamp(timestamp_nanos(&self.timestamp)?)
            .build()
            .map_err(|e| {
                StorageError::InvalidDataPoint(format!("Failed to build GasBillMetric: {}", e))
            })
    }
}
