//! WeatherAPI.com HTTP client.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fmt::Debug, sync::Arc};
use tracing::instrument;

use crate::{
    config::ClientConfig,
    diagnostics::{DiagnosticEvent, DiagnosticSink, Endpoint, TracingSink, truncate_body},
    error::WeatherError,
    model::{CityWeather, Location, WeatherData},
};

/// Number of forecast days requested from upstream.
pub const FORECAST_DAYS: &str = "7";

/// The four weather operations.
///
/// Implementors supply the two network calls; the by-city and by-coordinates
/// lookups are derived from [`WeatherService::get_weather`] and propagate its
/// errors unchanged. By-city additionally needs a `location` object in the
/// body and reports [`WeatherError::FetchFailed`] without one.
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    /// Forecast for a free-text place name or a `"lat,lon"` pair.
    async fn get_weather(&self, query: &str) -> Result<WeatherData, WeatherError>;

    /// Cities matching `query`, in upstream order.
    async fn search_city(&self, query: &str) -> Result<Vec<Location>, WeatherError>;

    async fn get_weather_by_city(&self, city_name: &str) -> Result<CityWeather, WeatherError> {
        let weather = self.get_weather(city_name).await?;
        let location = weather.location().ok_or_else(|| WeatherError::FetchFailed {
            status: None,
            detail: "Forecast response has no location object".to_string(),
        })?;
        Ok(CityWeather { weather, location })
    }

    async fn get_weather_by_coords(&self, lat: f64, lon: f64) -> Result<WeatherData, WeatherError> {
        self.get_weather(&coords_query(lat, lon)).await
    }
}

/// `"{lat},{lon}"` using the shortest decimal form of each number.
pub fn coords_query(lat: f64, lon: f64) -> String {
    format!("{lat},{lon}")
}

/// Why a single request failed, before it is mapped to a [`WeatherError`].
#[derive(Debug)]
struct Failure {
    status: Option<u16>,
    detail: String,
}

#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    config: ClientConfig,
    http: Client,
    sink: Arc<dyn DiagnosticSink>,
}

impl WeatherApiClient {
    /// Client that reports diagnostics through `tracing`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    pub fn with_sink(config: ClientConfig, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { config, http: Client::new(), sink }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET `{base}/{endpoint}?key=..&q=..[&extra..]` and decode the JSON body.
    ///
    /// Every failure is reported to the sink with whatever detail is available
    /// before being returned.
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, Failure> {
        self.sink.log(&DiagnosticEvent::Request { endpoint, query: query.to_string() });

        let mut params = vec![("key", self.config.api_key.as_str()), ("q", query)];
        params.extend_from_slice(extra);

        let result = self
            .http
            .get(self.config.endpoint(endpoint.path()))
            .query(&params)
            .send()
            .await;

        // reqwest errors embed the request URL, which carries the key.
        let res = match result {
            Ok(res) => res,
            Err(e) => return Err(self.fail(endpoint, None, e.without_url().to_string())),
        };

        let status = res.status();
        let body = match res.text().await {
            Ok(body) => body,
            Err(e) => {
                let detail = e.without_url().to_string();
                return Err(self.fail(endpoint, Some(status.as_u16()), detail));
            }
        };

        if !status.is_success() {
            return Err(self.fail(endpoint, Some(status.as_u16()), truncate_body(&body)));
        }

        let parsed = serde_json::from_str(&body).map_err(|e| {
            self.fail(
                endpoint,
                Some(status.as_u16()),
                format!("Failed to parse {endpoint} JSON: {e}"),
            )
        })?;

        self.sink.log(&DiagnosticEvent::Response { endpoint, status: status.as_u16() });
        Ok(parsed)
    }

    fn fail(&self, endpoint: Endpoint, status: Option<u16>, detail: String) -> Failure {
        self.sink.log(&DiagnosticEvent::Failure { endpoint, status, detail: detail.clone() });
        Failure { status, detail }
    }
}

#[async_trait]
impl WeatherService for WeatherApiClient {
    #[instrument(skip(self))]
    async fn get_weather(&self, query: &str) -> Result<WeatherData, WeatherError> {
        self.fetch(
            Endpoint::Forecast,
            query,
            &[("days", FORECAST_DAYS), ("aqi", "no"), ("alerts", "no")],
        )
        .await
        .map(WeatherData::new)
        .map_err(|f| WeatherError::from_forecast_failure(f.status, f.detail))
    }

    #[instrument(skip(self))]
    async fn search_city(&self, query: &str) -> Result<Vec<Location>, WeatherError> {
        let hits: Vec<Value> = self
            .fetch(Endpoint::Search, query, &[])
            .await
            .map_err(|f| WeatherError::from_search_failure(f.status, f.detail))?;

        Ok(hits.iter().map(Location::project).collect())
    }
}
