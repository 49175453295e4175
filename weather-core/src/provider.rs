use crate::{Config, error::WeatherError, model::DayObservation, provider::visualcrossing::VisualCrossingProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod visualcrossing;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the observation or forecast for `date` at `location`.
    ///
    /// Both values are forwarded to the provider as-is; rejecting them is
    /// the provider's job.
    async fn fetch_day(&self, location: &str, date: &str) -> Result<DayObservation, WeatherError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.provider_api_key()?;

    let provider = VisualCrossingProvider::new(api_key.to_owned())?
        .with_base_url(config.provider_base_url())?
        .with_timeout(config.provider_timeout())?;

    Ok(Box::new(provider))
}
