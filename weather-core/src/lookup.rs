use crate::{
    error::WeatherError,
    model::WeatherResult,
    provider::WeatherProvider,
    recommend::{fahrenheit_to_celsius, recommend},
};

/// Fetch the day's weather from `provider` and attach clothing advice.
pub async fn lookup(
    provider: &dyn WeatherProvider,
    location: &str,
    date: &str,
) -> Result<WeatherResult, WeatherError> {
    let day = provider.fetch_day(location, date).await?;

    let temp_c = fahrenheit_to_celsius(day.temp_f);
    let recommendations = recommend(temp_c, &day.conditions);

    Ok(WeatherResult { temp_c, condition: day.conditions, recommendations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DayObservation;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FixedProvider(Result<(f64, &'static str), u16>);

    #[async_trait]
    impl WeatherProvider for FixedProvider {
        async fn fetch_day(&self, _: &str, _: &str) -> Result<DayObservation, WeatherError> {
            match self.0 {
                Ok((temp_f, conditions)) => {
                    Ok(DayObservation { temp_f, conditions: conditions.to_string() })
                }
                Err(status) => Err(WeatherError::Provider { message: "nope".into(), status }),
            }
        }
    }

    #[tokio::test]
    async fn converts_and_recommends() {
        let provider = FixedProvider(Ok((50.0, "Rain")));
        let result = lookup(&provider, "Oslo", "2024-03-01").await.unwrap();

        assert!((result.temp_c - 10.0).abs() < 1e-9);
        assert_eq!(result.condition, "Rain");
        assert_eq!(result.recommendations, ["a light jacket", "an umbrella"]);
    }

    #[tokio::test]
    async fn freezing_snow_day() {
        let provider = FixedProvider(Ok((28.4, "Snow, Freezing Fog")));
        let result = lookup(&provider, "Oslo", "2024-01-01").await.unwrap();

        assert!((result.temp_c - (-2.0)).abs() < 1e-9);
        assert_eq!(
            result.recommendations,
            ["a warm coat", "hat, scarf, and gloves", "waterproof boots"]
        );
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let provider = FixedProvider(Err(401));
        let err = lookup(&provider, "Oslo", "2024-01-01").await.unwrap_err();

        assert_eq!(err.status_code(), 401);
    }
}
