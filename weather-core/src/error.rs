use thiserror::Error;

/// Every way a weather request can fail, each carrying the HTTP status the
/// service answers with.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Missing or incorrect shared-secret token.
    #[error("{message}")]
    Auth { message: String, status: u16 },

    /// The provider answered with a non-200 status. `message` is its raw body.
    #[error("{message}")]
    Provider { message: String, status: u16 },

    /// The provider answered 200 but the payload has no usable `days[0]`.
    #[error("malformed weather provider response: {0}")]
    ProviderData(String),

    /// The provider could not be reached or did not answer in time.
    #[error("weather provider unreachable: {0}")]
    Transport(reqwest::Error),
}

/// The request URL carries the provider API key, so it is stripped before
/// the error can reach a response body or a log line.
impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

impl WeatherError {
    pub fn missing_token() -> Self {
        Self::Auth { message: "token is required".to_string(), status: 400 }
    }

    pub fn wrong_token() -> Self {
        Self::Auth { message: "wrong API token".to_string(), status: 403 }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Auth { status, .. } | Self::Provider { status, .. } => *status,
            Self::ProviderData(_) => 502,
            Self::Transport(e) if e.is_timeout() => 504,
            Self::Transport(_) => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_carry_expected_status() {
        let missing = WeatherError::missing_token();
        assert_eq!(missing.status_code(), 400);
        assert_eq!(missing.to_string(), "token is required");

        let wrong = WeatherError::wrong_token();
        assert_eq!(wrong.status_code(), 403);
        assert_eq!(wrong.to_string(), "wrong API token");
    }

    #[test]
    fn provider_error_mirrors_upstream_status_and_body() {
        let err = WeatherError::Provider { message: "Bad location".into(), status: 400 };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Bad location");
    }

    #[test]
    fn provider_data_error_is_bad_gateway() {
        let err = WeatherError::ProviderData("response contained no days".into());
        assert_eq!(err.status_code(), 502);
        assert!(err.to_string().contains("no days"));
    }
}
