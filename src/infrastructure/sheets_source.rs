// Google Sheets row source
use crate::application::table_source::{Row, TableSource};
use crate::infrastructure::config::SheetsSettings;
use crate::infrastructure::sheet_values::{values_to_rows, SourceFetchError, ValueRange};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SheetsSource {
    client: reqwest::Client,
    settings: SheetsSettings,
}

impl SheetsSource {
    pub fn new(settings: SheetsSettings) -> anyhow::Result<Self> {
        anyhow::ensure!(
            !settings.spreadsheet_id.is_empty(),
            "sheets.spreadsheet_id must be set when reading from Google Sheets"
        );
        if settings.api_key.is_none() && settings.access_token.is_none() {
            tracing::warn!("No Sheets credentials configured, only public sheets will be readable");
        }

        Ok(Self {
            client: reqwest::Client::new(),
            settings,
        })
    }

    fn build_values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.settings.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.settings.spreadsheet_id),
            urlencoding::encode(&self.settings.range)
        )
    }

    async fn fetch_once(&self) -> Result<ValueRange, SourceFetchError> {
        let mut request = self
            .client
            .get(self.build_values_url())
            .header("Accept", "application/json");
        if let Some(key) = &self.settings.api_key {
            request = request.query(&[("key", key)]);
        }
        if let Some(token) = &self.settings.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SourceFetchError::Unauthorized(status));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceFetchError::Status { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_with_retry(&self) -> Result<ValueRange, SourceFetchError> {
        let attempts = self.settings.max_attempts.max(1);
        let delay = Duration::from_millis(self.settings.retry_delay_ms);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.fetch_once().await {
                Ok(range) => return Ok(range),
                Err(e) if e.is_transient() && attempt < attempts => {
                    tracing::warn!(
                        "Sheets fetch attempt {}/{} failed: {}, retrying in {:?}",
                        attempt,
                        attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) if e.is_transient() && attempts > 1 => {
                    return Err(SourceFetchError::Exhausted {
                        attempts,
                        last: Box::new(e),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl TableSource for SheetsSource {
    async fn fetch_rows(&self) -> anyhow::Result<Vec<Row>> {
        tracing::debug!(
            "Fetching range {} of sheet {}",
            self.settings.range,
            self.settings.spreadsheet_id
        );
        let range = self.fetch_with_retry().await?;
        tracing::debug!(
            "Received {} rows for range {}",
            range.values.len(),
            range.range.as_deref().unwrap_or("<unknown>")
        );
        Ok(values_to_rows(range.values))
    }
}
