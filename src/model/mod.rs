//! Model definitions for gas usage metrics and InfluxDB data points.
//!
//! This module provides the core data structures and traits for representing
//! what the collector scrapes from the Towngas portal and converting it to
//! InfluxDB data points.

pub mod metrics;
pub mod traits;
pub mod types;
pub mod utilities;

// Re-export commonly used items at the module level
pub use metrics::{GasBillMetric, GasReadingMetric, GasUsageMetric};
pub use traits::{DataPointBuilder, MetricCollector};
pub use types::{DeviceClass, Measurement, StateClass, Unit};
pub use utilities::batch_collect_metrics;
