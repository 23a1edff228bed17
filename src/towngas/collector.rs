//! Gas usage collector.
//!
//! One refresh runs four sequential portal calls: sign in, resolve the
//! account, fetch the usage chart and fetch the bills. Every call depends on
//! the session (and account) from the previous one, so nothing runs in
//! parallel. Refreshes are throttled by [`Freshness`].

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::client::Client;
use super::freshness::Freshness;
use super::parsing;
use super::records::AccountNumber;
use super::sensor::SensorState;
use crate::error::{CollectorError, TownGasError};
use crate::model::{DataPointBuilder, MetricCollector};

/// What a call to [`GasUsageCollector::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// All four calls succeeded and the state was refreshed
    Refreshed,
    /// The last refresh is still fresh; no network call was made
    Throttled,
}

/// Point-in-time view of the collector.
#[derive(Debug, Clone)]
pub struct CollectorSnapshot {
    pub sensor: SensorState,
    pub account_number: Option<AccountNumber>,
    pub last_refreshed: Option<DateTime<Local>>,
}

struct CollectorState {
    sensor: SensorState,
    freshness: Freshness,
    account_number: Option<AccountNumber>,
}

pub struct GasUsageCollector {
    client: Arc<Client>,
    // held for the whole refresh, so updates never overlap
    state: Mutex<CollectorState>,
}

impl GasUsageCollector {
    pub fn new(client: Arc<Client>, min_update_interval: Duration, history_limit: usize) -> Self {
        let sensor = SensorState::new(client.config().name.clone(), history_limit);
        Self {
            client,
            state: Mutex::new(CollectorState {
                sensor,
                freshness: Freshness::new(min_update_interval),
                account_number: None,
            }),
        }
    }

    /// Refreshes the sensor from the portal unless the last refresh is still
    /// fresh at `now`.
    ///
    /// On error the sensor keeps what it had, except that readings committed
    /// before the billing call failed are retained. A failed refresh doesn't
    /// start a new throttle window.
    pub async fn update(&self, now: DateTime<Local>) -> Result<UpdateOutcome, TownGasError> {
        let mut state = self.state.lock().await;

        if state.freshness.is_fresh(now) {
            tracing::debug!(
                sensor = %state.sensor.name(),
                next_refresh_at = ?state.freshness.next_refresh_at(),
                "Skipping refresh, last result is still fresh"
            );
            return Ok(UpdateOutcome::Throttled);
        }

        self.client.sign_in().await?;

        let account = self.client.hosted_account().await?;
        tracing::debug!(sensor = %state.sensor.name(), account = %account, "Resolved account");
        state.account_number = Some(account.clone());

        let chart = self.client.meter_readings(&account).await?;
        let readings = parsing::readings_from_chart(&chart.chart_bar_list)?;
        let reading_stats = state.sensor.apply_readings(readings);

        let billing = self.client.billing_info(&account).await?;
        let bills = parsing::bills_from_billing(&billing.list)?;
        let bill_stats = state.sensor.apply_bills(bills);

        state.freshness.mark_refreshed(now);

        tracing::info!(
            sensor = %state.sensor.name(),
            value = ?state.sensor.native_value(),
            readings = state.sensor.readings().len(),
            latest_reading = ?state.sensor.readings().latest().map(|r| r.time.as_str()),
            new_readings = reading_stats.inserted,
            updated_readings = reading_stats.replaced,
            evicted = reading_stats.evicted + bill_stats.evicted,
            bills = state.sensor.bills().len(),
            new_bills = bill_stats.inserted,
            "Refreshed gas usage"
        );

        Ok(UpdateOutcome::Refreshed)
    }

    /// State as of the last (possibly partial) refresh.
    pub async fn snapshot(&self) -> CollectorSnapshot {
        let state = self.state.lock().await;
        CollectorSnapshot {
            sensor: state.sensor.clone(),
            account_number: state.account_number.clone(),
            last_refreshed: state.freshness.last_refreshed(),
        }
    }
}

#[async_trait]
impl MetricCollector for GasUsageCollector {
    async fn collect(
        &self,
        timestamp: DateTime<Local>,
    ) -> Result<Vec<Box<dyn DataPointBuilder>>, CollectorError> {
        if let Err(err) = self.update(timestamp).await {
            tracing::error!(
                error = %err,
                transient = err.is_transient(),
                "Failed to refresh gas usage"
            );
            return Err(err.into());
        }

        let snapshot = self.snapshot().await;
        tracing::debug!(
            sensor = %snapshot.sensor.name(),
            account = ?snapshot.account_number.as_ref().map(AccountNumber::as_str),
            last_refreshed = ?snapshot.last_refreshed,
            state = %snapshot.sensor.to_json(),
            "Sensor state"
        );
        Ok(snapshot.sensor.to_metrics(timestamp))
    }
}
