//! Consolidated test utilities and helpers for the Towngas to InfluxDB2 forwarder.
//!
//! This module provides a centralized location for test configuration builders,
//! portal response fixtures and mock implementations used throughout the codebase.

#![cfg(test)]

pub mod config;
pub mod fixtures;
pub mod mocks;
