//! Towngas to InfluxDB2 Forwarder
//!
//! This application logs in to the Towngas e-service portal, scrapes the gas
//! usage chart and billing history of the hosted account, and forwards the
//! resulting sensor state to InfluxDB2 for storage and visualization.
//!
//! # Architecture
//!
//! A single collection loop polls the gas usage collector every
//! `COLLECTOR_INTERVAL_SEC`. The collector itself only goes to the portal
//! when its last successful refresh is older than
//! `COLLECTOR_MIN_UPDATE_INTERVAL_SEC`; in between it republishes what it has.
//!
//! # Features
//!
//! - Session cookie handling across the four portal calls
//! - Typed errors, logged without stopping the loop
//! - Automatic restart of a crashed poll task
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Timeout protection for hung tasks

mod config;
mod error;
mod influxdb;
mod model;
mod towngas;

#[cfg(test)]
mod test_utils;

use crate::error::{CollectorError, Result};
use crate::model::{batch_collect_metrics, MetricCollector};
use chrono::{DateTime, Local};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinError;
use tokio::time;
use tokio::time::{sleep, Duration};

/// Application entry point.
///
/// Initializes configuration, sets up the collector, and manages the main event loop
/// with signal handling for graceful shutdown.
#[tokio::main]
async fn main() {
    let app_config = config::load_app_config().expect("Failed to load AppConfig");
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let collector_config =
        Arc::new(config::load_collector_config().expect("Failed to load CollectorConfig"));
    let influx_config = config::load_influx_config().expect("Failed to load InfluxConfig");
    let influx_client = Arc::new(influxdb::Client::new(influx_config));

    let towngas_config = config::load_towngas_config().expect("Failed to load TownGasConfig");
    tracing::info!(config = ?towngas_config, "Loaded Towngas configuration");
    let collectors = Arc::new(
        build_collectors(towngas_config, &collector_config).expect("Failed to build collectors"),
    );

    // Factory for the poll task, so it can be recreated after a failure
    let create_poll_task = || -> tokio::task::JoinHandle<()> {
        let config = Arc::clone(&collector_config);
        tokio::spawn(create_collect_task(
            Arc::clone(&influx_client),
            Arc::clone(&collectors),
            Duration::from_secs(config.interval_sec),
            "gas_usage_collectors",
            config.task_timeout_sec,
        ))
    };
    let mut poll_task = create_poll_task();

    let mut sig_term = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
    tracing::info!("Running... Press Ctrl-C or send SIGTERM to terminate.");
    loop {
        tokio::select! {
            _ = sig_term.recv() => {
                tracing::info!("Received SIGTERM. Exiting...");
                break;
            }
            _ = ctrl_c() => {
                tracing::info!("Received SIGINT. Exiting...");
                break;
            }
            result = &mut poll_task => {
                handle_task_result("gas_usage_collectors", result);
                poll_task = create_poll_task();
            }
        }
    }
}

/// Builds the collectors for one Towngas account.
fn build_collectors(
    towngas_config: config::TownGasConfig,
    collector_config: &config::CollectorConfig,
) -> Result<Vec<Box<dyn MetricCollector>>> {
    let client = Arc::new(towngas::Client::new(towngas_config)?);
    let collector: Box<dyn MetricCollector> = Box::new(towngas::GasUsageCollector::new(
        client,
        Duration::from_secs(collector_config.min_update_interval_sec),
        collector_config.history_limit,
    ));
    Ok(vec![collector])
}

/// Wraps a future with a timeout to prevent tasks from hanging indefinitely.
///
/// Logs an error if the task times out but doesn't propagate it.
async fn with_timeout<F>(task_name: &'static str, future: F, timeout_seconds: u64)
where
    F: IntoFuture,
{
    let timeout_duration = Duration::from_secs(timeout_seconds);

    if time::timeout(timeout_duration, future).await.is_err() {
        let err = CollectorError::timeout(task_name, timeout_seconds);
        tracing::error!(error = %err, "Task {} timed out.", task_name);
    }
}

/// Collects once from every collector and writes the points to InfluxDB.
///
/// Returns the number of points written.
async fn poll_once(
    influx_client: &influxdb::Client,
    collectors: &[Box<dyn MetricCollector>],
    timestamp: DateTime<Local>,
) -> Result<usize> {
    let points = batch_collect_metrics(collectors, timestamp).await;

    for point in &points {
        tracing::debug!("{:?}", point);
    }

    let count = points.len();
    if count > 0 {
        influx_client.write(points).await?;
    }
    Ok(count)
}

/// Runs a single poll cycle and then sleeps for `interval`.
///
/// Collection and write errors are logged; the next cycle starts regardless.
async fn create_collect_task(
    influx_client: Arc<influxdb::Client>,
    collectors: Arc<Vec<Box<dyn MetricCollector>>>,
    interval: Duration,
    task_name: &'static str,
    timeout_seconds: u64,
) {
    with_timeout(
        task_name,
        async {
            match poll_once(&influx_client, &collectors, Local::now()).await {
                Ok(0) => tracing::warn!("No points to write ({})", task_name),
                Ok(count) => tracing::info!(
                    "Successfully wrote {} points to InfluxDB ({})",
                    count,
                    task_name
                ),
                Err(e) => tracing::error!(
                    "Failed to write points to InfluxDB ({}): {:?}",
                    task_name,
                    e
                ),
            }
        },
        timeout_seconds,
    )
    .await;
    sleep(interval).await;
}

/// Handles the result of a tokio task, logging success or failure.
///
/// Used in the main loop to detect and log task crashes before restarting.
fn handle_task_result(task_name: &str, result: Result<(), JoinError>) {
    match result {
        Ok(_) => {
            tracing::debug!("Task {} completed.", task_name);
        }
        Err(e) => {
            tracing::error!("Task {} failed: {:?}", task_name, e);
        }
    }
}
