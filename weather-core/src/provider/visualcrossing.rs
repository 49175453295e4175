use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::{error::WeatherError, model::DayObservation};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Visual Crossing timeline API client.
#[derive(Clone)]
pub struct VisualCrossingProvider {
    api_key: String,
    base_url: Url,
    http: Client,
}

impl VisualCrossingProvider {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        Ok(Self {
            api_key,
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            http: build_client(DEFAULT_TIMEOUT)?,
        })
    }

    /// Point the client at another timeline endpoint, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: &str) -> anyhow::Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> anyhow::Result<Self> {
        self.http = build_client(timeout)?;
        Ok(self)
    }

    fn timeline_url(&self, location: &str, date: &str) -> Url {
        let mut url = self.base_url.clone();
        // Cannot-be-a-base URLs are rejected in `parse_base_url`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(location).push(date);
        }
        url
    }
}

impl std::fmt::Debug for VisualCrossingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualCrossingProvider")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid provider base URL: {raw}"))?;
    if url.cannot_be_a_base() {
        bail!("Provider base URL cannot take path segments: {raw}");
    }
    Ok(url)
}

fn build_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| anyhow!("Failed to build HTTP client: {e}"))
}

#[derive(Debug, Deserialize)]
struct VcTimeline {
    #[serde(default)]
    days: Vec<VcDay>,
}

#[derive(Debug, Deserialize)]
struct VcDay {
    temp: Option<f64>,
    conditions: Option<String>,
}

fn parse_timeline(body: &str) -> Result<DayObservation, WeatherError> {
    let parsed: VcTimeline = serde_json::from_str(body)
        .map_err(|e| WeatherError::ProviderData(format!("invalid JSON: {e}")))?;

    let day = parsed
        .days
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::ProviderData("response contained no days".to_string()))?;

    let temp_f = day
        .temp
        .ok_or_else(|| WeatherError::ProviderData("first day has no `temp`".to_string()))?;
    let conditions = day
        .conditions
        .ok_or_else(|| WeatherError::ProviderData("first day has no `conditions`".to_string()))?;

    Ok(DayObservation { temp_f, conditions })
}

#[async_trait]
impl WeatherProvider for VisualCrossingProvider {
    async fn fetch_day(&self, location: &str, date: &str) -> Result<DayObservation, WeatherError> {
        let url = self.timeline_url(location, date);
        tracing::debug!(%location, %date, "requesting Visual Crossing timeline");

        let res = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str()), ("unitGroup", "us")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        tracing::debug!(%status, bytes = body.len(), "Visual Crossing responded");

        if status != StatusCode::OK {
            return Err(WeatherError::Provider { message: body, status: status.as_u16() });
        }

        parse_timeline(&body)
    }
}
