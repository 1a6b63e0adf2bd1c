use thiserror::Error;

/// Failures surfaced by the weather client.
///
/// The rendered message is always one of four fixed strings; the status code
/// and upstream detail are kept as fields for diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeatherError {
    /// Upstream answered 400 to a forecast request.
    #[error("City not found")]
    CityNotFound { status: u16, detail: String },

    /// Upstream answered 401 to a forecast request.
    #[error("Invalid API key")]
    InvalidApiKey { status: u16, detail: String },

    /// Any other forecast failure: other statuses, transport errors, bad bodies.
    #[error("Failed to fetch weather data")]
    FetchFailed { status: Option<u16>, detail: String },

    /// Any city search failure.
    #[error("Failed to search city")]
    SearchFailed { status: Option<u16>, detail: String },
}

impl WeatherError {
    /// Map a failed forecast request onto the error taxonomy.
    pub(crate) fn from_forecast_failure(status: Option<u16>, detail: String) -> Self {
        match status {
            Some(400) => Self::CityNotFound { status: 400, detail },
            Some(401) => Self::InvalidApiKey { status: 401, detail },
            status => Self::FetchFailed { status, detail },
        }
    }

    pub(crate) fn from_search_failure(status: Option<u16>, detail: String) -> Self {
        Self::SearchFailed { status, detail }
    }

    /// HTTP status returned by upstream, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::CityNotFound { status, .. } | Self::InvalidApiKey { status, .. } => {
                Some(*status)
            }
            Self::FetchFailed { status, .. } | Self::SearchFailed { status, .. } => *status,
        }
    }

    /// Raw upstream body or transport message, truncated.
    pub fn detail(&self) -> &str {
        match self {
            Self::CityNotFound { detail, .. }
            | Self::InvalidApiKey { detail, .. }
            | Self::FetchFailed { detail, .. }
            | Self::SearchFailed { detail, .. } => detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_failures_map_by_status() {
        let err = WeatherError::from_forecast_failure(Some(400), "no match".into());
        assert_eq!(err.to_string(), "City not found");
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.detail(), "no match");

        let err = WeatherError::from_forecast_failure(Some(401), String::new());
        assert_eq!(err.to_string(), "Invalid API key");

        let err = WeatherError::from_forecast_failure(Some(403), String::new());
        assert_eq!(err.to_string(), "Failed to fetch weather data");
        assert_eq!(err.status(), Some(403));

        let err = WeatherError::from_forecast_failure(None, "connection refused".into());
        assert!(matches!(err, WeatherError::FetchFailed { status: None, .. }));
    }

    #[test]
    fn search_failures_ignore_status() {
        for status in [Some(400), Some(401), Some(500), None] {
            let err = WeatherError::from_search_failure(status, "x".into());
            assert_eq!(err.to_string(), "Failed to search city");
            assert_eq!(err.status(), status);
        }
    }
}
