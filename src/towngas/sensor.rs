use chrono::{DateTime, Local};
use serde_json::{json, Value};

use super::history::{History, MergeStats};
use super::parsing::ChartReadings;
use super::records::{Bill, Reading};
use crate::model::{
    DataPointBuilder, DeviceClass, GasBillMetric, GasReadingMetric, GasUsageMetric, StateClass,
    Unit,
};

/// What the gas sensor exposes: a value plus its reading and bill history.
#[derive(Debug, Clone)]
pub struct SensorState {
    name: String,
    native_value: Option<f64>,
    readings: History<Reading>,
    bills: History<Bill>,
}

impl SensorState {
    pub const UNIT: Unit = Unit::Megajoule;
    pub const DEVICE_CLASS: DeviceClass = DeviceClass::Gas;
    pub const STATE_CLASS: StateClass = StateClass::Total;

    pub fn new(name: impl Into<String>, history_limit: usize) -> Self {
        Self {
            name: name.into(),
            native_value: None,
            readings: History::with_capacity(history_limit),
            bills: History::with_capacity(history_limit),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latest estimated usage; unset until a chart carries an estimate month.
    pub fn native_value(&self) -> Option<f64> {
        self.native_value
    }

    pub fn readings(&self) -> &History<Reading> {
        &self.readings
    }

    pub fn bills(&self) -> &History<Bill> {
        &self.bills
    }

    /// Merges chart readings; a chart without an estimate keeps the old value.
    pub fn apply_readings(&mut self, chart: ChartReadings) -> MergeStats {
        if let Some(latest) = chart.latest {
            self.native_value = Some(latest);
        }
        self.readings.merge(chart.readings)
    }

    pub fn apply_bills(&mut self, bills: Vec<Bill>) -> MergeStats {
        self.bills.merge(bills)
    }

    pub fn attributes(&self) -> Value {
        json!({
            "readings": self.readings,
            "bills": self.bills,
        })
    }

    /// Renders the entity the way a home-automation host would show it.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "state": self.native_value,
            "unit_of_measurement": Self::UNIT.to_string(),
            "device_class": Self::DEVICE_CLASS.to_string(),
            "state_class": Self::STATE_CLASS.to_string(),
            "attributes": self.attributes(),
        })
    }

    pub fn to_metrics(&self, timestamp: DateTime<Local>) -> Vec<Box<dyn DataPointBuilder>> {
        let mut metrics: Vec<Box<dyn DataPointBuilder>> = Vec::new();

        if let Some(value) = self.native_value {
            metrics.push(Box::new(GasUsageMetric {
                sensor: self.name.clone(),
                value,
                timestamp,
            }));
        }

        metrics.extend(self.readings.iter().map(|reading| {
            Box::new(GasReadingMetric {
                sensor: self.name.clone(),
                month: reading.time.clone(),
                value: reading.energy,
                estimated: reading.estimated,
                timestamp,
            }) as Box<dyn DataPointBuilder>
        }));

        metrics.extend(self.bills.iter().map(|bill| {
            Box::new(GasBillMetric {
                sensor: self.name.clone(),
                bill_date: bill.time.clone(),
                total: bill.total,
                timestamp,
            }) as Box<dyn DataPointBuilder>
        }));

        metrics
    }
}
