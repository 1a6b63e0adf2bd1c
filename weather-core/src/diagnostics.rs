//! Diagnostic events emitted around each upstream request.
//!
//! The client never writes to the console itself; it hands events to a
//! [`DiagnosticSink`]. [`TracingSink`] is the default and forwards to `tracing`.

use std::fmt::Debug;

/// Which upstream endpoint an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Forecast,
    Search,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Forecast => "forecast.json",
            Endpoint::Search => "search.json",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Events never carry the API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    Request { endpoint: Endpoint, query: String },
    Response { endpoint: Endpoint, status: u16 },
    Failure { endpoint: Endpoint, status: Option<u16>, detail: String },
}

pub trait DiagnosticSink: Send + Sync + Debug {
    fn log(&self, event: &DiagnosticEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::Request { endpoint, query } => {
                tracing::debug!(%endpoint, query = %query, "Sending WeatherAPI request");
            }
            DiagnosticEvent::Response { endpoint, status } => {
                tracing::debug!(%endpoint, status, "WeatherAPI response received");
            }
            DiagnosticEvent::Failure { endpoint, status, detail } => {
                tracing::error!(%endpoint, ?status, detail = %detail, "WeatherAPI request failed");
            }
        }
    }
}

/// Cut an upstream body down to something fit for a log line.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
