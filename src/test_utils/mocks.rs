//! Mock implementations and server helpers for testing.
//!
//! `MockPortal` stands in for the Towngas e-service portal; `MockMetricCollector`
//! and `FailingDataPointBuilder` exercise the metric pipeline without HTTP.

use crate::error::{CollectorError, StorageError, TownGasError};
use crate::model::{DataPointBuilder, GasUsageMetric, MetricCollector};
use crate::test_utils::config::TestTownGasConfigBuilder;
use crate::test_utils::fixtures;
use crate::towngas::{
    Client, BILLING_PATH, HOSTED_ACCOUNT_PATH, METER_READING_PATH, SIGN_IN_PATH,
};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use influxdb2::models::DataPoint;
use serde_json::Value;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A wiremock server answering the four portal endpoints.
///
/// Expected call counts are verified when the server is dropped.
pub struct MockPortal {
    server: MockServer,
}

impl MockPortal {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// A portal client pointed at this server.
    pub fn client(&self) -> Arc<Client> {
        let config = TestTownGasConfigBuilder::new()
            .with_url(self.server.uri())
            .build();
        Arc::new(Client::new(config).unwrap())
    }

    /// Drops every mounted endpoint so the next refresh sees a different portal.
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    pub async fn mount_sign_in(&self, status: u16, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(SIGN_IN_PATH))
            .respond_with(
                ResponseTemplate::new(status)
                    .insert_header("set-cookie", "ASP.NET_SessionId=test-session; Path=/"),
            )
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_account_ok(&self, expected_calls: u64) {
        self.mount_json(HOSTED_ACCOUNT_PATH, fixtures::account_json(), expected_calls)
            .await;
    }

    pub async fn mount_chart_ok(&self, expected_calls: u64) {
        self.mount_json(METER_READING_PATH, fixtures::chart_json(), expected_calls)
            .await;
    }

    pub async fn mount_billing(&self, body: Value, expected_calls: u64) {
        self.mount_json(BILLING_PATH, body, expected_calls).await;
    }

    /// Mounts all four endpoints with successful fixtures, without call-count checks.
    pub async fn mount_all_ok(&self) {
        self.mount_all(None).await;
    }

    /// Mounts all four endpoints, each expected to be called `refreshes` times.
    pub async fn mount_all_ok_expecting(&self, refreshes: u64) {
        self.mount_all(Some(refreshes)).await;
    }

    async fn mount_all(&self, refreshes: Option<u64>) {
        let mocks = vec![
            Mock::given(method("POST"))
                .and(path(SIGN_IN_PATH))
                .respond_with(ResponseTemplate::new(200)),
            Mock::given(method("POST"))
                .and(path(HOSTED_ACCOUNT_PATH))
                .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::account_json())),
            Mock::given(method("POST"))
                .and(path(METER_READING_PATH))
                .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::chart_json())),
            Mock::given(method("POST"))
                .and(path(BILLING_PATH))
                .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::billing_json())),
        ];

        for mock in mocks {
            let mock = match refreshes {
                Some(n) => mock.expect(n),
                None => mock,
            };
            mock.mount(&self.server).await;
        }
    }

    async fn mount_json(&self, endpoint: &str, body: Value, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }
}

/// A mock metric collector that can be configured to succeed or fail.
pub struct MockMetricCollector {
    should_fail: bool,
    create_data: Box<dyn Fn() -> Vec<Box<dyn DataPointBuilder>> + Send + Sync>,
}

impl MockMetricCollector {
    /// Creates a new mock collector that succeeds with one usage metric.
    pub fn new_success() -> Self {
        Self::new_with_data(|| {
            vec![Box::new(GasUsageMetric {
                sensor: "test".to_string(),
                value: 100.0,
                timestamp: Local::now(),
            })]
        })
    }

    /// Creates a new mock collector that fails like a rejected login.
    pub fn new_failure() -> Self {
        Self {
            should_fail: true,
            create_data: Box::new(Vec::<Box<dyn DataPointBuilder>>::new),
        }
    }

    /// Creates a new mock collector with custom success data.
    pub fn new_with_data<F>(create_fn: F) -> Self
    where
        F: Fn() -> Vec<Box<dyn DataPointBuilder>> + Send + Sync + 'static,
    {
        Self {
            should_fail: false,
            create_data: Box::new(create_fn),
        }
    }
}

#[async_trait]
impl MetricCollector for MockMetricCollector {
    async fn collect(
        &self,
        _timestamp: DateTime<Local>,
    ) -> Result<Vec<Box<dyn DataPointBuilder>>, CollectorError> {
        if self.should_fail {
            Err(TownGasError::AuthFailed { status: 403 }.into())
        } else {
            Ok((self.create_data)())
        }
    }
}

/// A data point builder that always fails.
#[derive(Clone)]
pub struct FailingDataPointBuilder;

impl DataPointBuilder for FailingDataPointBuilder {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        Err(StorageError::InvalidDataPoint(
            "Mock conversion failure".to_string(),
        ))
    }
}
