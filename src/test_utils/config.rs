//! Configuration utilities for testing.

use crate::config::{InfluxConfig, TownGasConfig};

/// Builder for creating test Towngas configurations.
#[derive(Debug)]
pub struct TestTownGasConfigBuilder {
    url: String,
    timeout: u64,
}

impl TestTownGasConfigBuilder {
    /// Creates a new test config builder with default values.
    pub fn new() -> Self {
        Self {
            url: "http://test.local".to_string(),
            timeout: 5,
        }
    }

    /// Sets the portal base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the per-request timeout in seconds.
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> TownGasConfig {
        TownGasConfig {
            name: "Test Gas".to_string(),
            username: "test_user".to_string(),
            password: "test_password".to_string(),
            timeout: self.timeout,
            url: self.url,
        }
    }
}

/// Creates a test InfluxDB configuration pointing at `url`.
pub fn test_influx_config(url: impl Into<String>) -> InfluxConfig {
    InfluxConfig {
        url: url.into(),
        org: "test-org".to_string(),
        token: "test-token".to_string(),
        bucket: "test-bucket".to_string(),
    }
}
