mod client;
mod collector;
mod freshness;
mod history;
mod parsing;
mod records;
mod response;
mod sensor;

pub use client::{Client, BILLING_PATH, HOSTED_ACCOUNT_PATH, METER_READING_PATH, SIGN_IN_PATH};
pub use collector::{GasUsageCollector, UpdateOutcome};
pub use sensor::SensorState;
