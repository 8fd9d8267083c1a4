use std::io::Write;

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::error;

pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_DEBUG: &str = "debug";
pub const OUTCOME_ERROR: &str = "error";

/// Client-side counters, owned by whoever builds the client.
#[derive(Clone)]
pub struct ClientMetrics {
    pub registry: Registry,

    // Token metrics
    pub token_refresh: IntCounterVec,

    // Catalog metrics
    pub api_requests: IntCounterVec,
    pub api_failures: IntCounterVec,
    pub api_duration: HistogramVec,
}

impl ClientMetrics {
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("bmm".into()), None).expect("static registry prefix");

        let metrics = Self {
            token_refresh: IntCounterVec::new(Opts::new("token_refresh_total", "Token refreshes by outcome"), &["outcome"]).expect("static metric"),

            api_requests: IntCounterVec::new(Opts::new("api_requests_total", "Catalog requests by method"), &["method"]).expect("static metric"),
            api_failures: IntCounterVec::new(Opts::new("api_failures_total", "Catalog failures by reason"), &["method", "kind"]).expect("static metric"),
            api_duration: HistogramVec::new(HistogramOpts::new("api_request_duration_seconds", "Catalog request duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["method"]).expect("static metric"),

            registry,
        };

        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_refresh.clone())).expect("unique metric");
        reg.register(Box::new(metrics.api_requests.clone())).expect("unique metric");
        reg.register(Box::new(metrics.api_failures.clone())).expect("unique metric");
        reg.register(Box::new(metrics.api_duration.clone())).expect("unique metric");

        metrics
    }

    pub fn refreshed(&self, outcome: &str) {
        self.token_refresh.with_label_values(&[outcome]).inc();
    }

    /// Prometheus text exposition of every registered metric.
    pub fn gather_text(&self) -> String {
        let mut buf = Vec::new();
        if let Err(e) = self.write_text(&mut buf) {
            error!(error = %e, "failed to encode metrics");
        }
        String::from_utf8(buf).unwrap_or_default()
    }

    pub fn write_text<W: Write>(&self, writer: &mut W) -> prometheus::Result<()> {
        TextEncoder::new().encode(&self.registry.gather(), writer)
    }
}

impl Default for ClientMetrics {
    fn default() -> Self {
        Self::new()
    }
}
