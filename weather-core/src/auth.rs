use serde_json::Value;

use crate::error::WeatherError;

/// Check a caller-presented token against the configured shared secret.
///
/// Any present token that is not exactly the secret string, including
/// non-string JSON values, is wrong rather than missing.
pub fn authenticate(presented: Option<&Value>, expected: &str) -> Result<(), WeatherError> {
    match presented {
        None => Err(WeatherError::missing_token()),
        Some(Value::String(token)) if token == expected => Ok(()),
        Some(_) => Err(WeatherError::wrong_token()),
    }
}
