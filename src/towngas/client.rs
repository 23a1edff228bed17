use crate::config;
use crate::error::{ParseError, TownGasError};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::parsing;
use super::records::AccountNumber;
use super::response::{BillingResponse, MeterReadingResponse};

/// The portal rejects requests that don't look like they come from a browser.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/104.0.5112.101 Safari/537.36";
pub const LANGUAGE: &str = "zh-HK";

pub const SIGN_IN_PATH: &str = "/EAccount/Login/SignIn";
pub const HOSTED_ACCOUNT_PATH: &str = "/Common/GetHostedTGAccountAsync";
pub const METER_READING_PATH: &str = "/Common/GetMeterReadingInfoForChat";
pub const BILLING_PATH: &str = "/EBilling/GetEBillingInfo";

/// HTTP session against the Towngas e-service portal.
///
/// The login sets a session cookie that the other endpoints require, so the
/// underlying client must keep a cookie store. Share one `Client` (behind an
/// `Arc`) between everything that talks to the portal for the same account.
pub struct Client {
    http_client: HttpClient,
    config: config::TownGasConfig,
}

impl Client {
    pub fn new(config: config::TownGasConfig) -> Result<Self, TownGasError> {
        let http_client = HttpClient::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_http_client(http_client, config))
    }

    /// Uses an existing HTTP client, which must have a cookie store enabled.
    pub fn with_http_client(http_client: HttpClient, config: config::TownGasConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &config::TownGasConfig {
        &self.config
    }

    /// Logs in; the session cookie ends up in the client's cookie store.
    pub async fn sign_in(&self) -> Result<(), TownGasError> {
        let response = self
            .post(
                SIGN_IN_PATH,
                &[
                    ("LoginID", self.config.username.as_str()),
                    ("password", self.config.password.as_str()),
                    ("Language", LANGUAGE),
                ],
            )
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            Err(TownGasError::server_error(status, body))
        } else {
            Err(TownGasError::AuthFailed {
                status: status.as_u16(),
            })
        }
    }

    /// Resolves the account hosted by the logged-in user.
    pub async fn hosted_account(&self) -> Result<AccountNumber, TownGasError> {
        let accounts: Vec<Value> = self.post_json(HOSTED_ACCOUNT_PATH, &[]).await?;
        Ok(parsing::account_number(&accounts)?)
    }

    pub async fn meter_readings(
        &self,
        account: &AccountNumber,
    ) -> Result<MeterReadingResponse, TownGasError> {
        self.post_json(
            METER_READING_PATH,
            &[
                ("accountNo", account.as_str()),
                ("language", LANGUAGE),
                ("isAccountInfo", "true"),
                ("isHousehold", "true"),
            ],
        )
        .await
    }

    pub async fn billing_info(
        &self,
        account: &AccountNumber,
    ) -> Result<BillingResponse, TownGasError> {
        self.post_json(BILLING_PATH, &[("accountNo", account.as_str())])
            .await
    }

    async fn post(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<reqwest::Response, TownGasError> {
        let url = format!("{}{}", self.config.url, path);
        tracing::debug!(url = %url, "POST");

        let mut request = self
            .http_client
            .post(&url)
            .timeout(Duration::from_secs(self.config.timeout));
        if !form.is_empty() {
            request = request.form(form);
        }

        request
            .send()
            .await
            .map_err(|e| TownGasError::from_request(e, self.config.timeout))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, TownGasError> {
        let response = self.post(path, form).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TownGasError::from_request(e, self.config.timeout))?;

        if !status.is_success() {
            return Err(TownGasError::server_error(status, body));
        }

        serde_json::from_str(&body).map_err(|e| ParseError::json(path, e).into())
    }
}
