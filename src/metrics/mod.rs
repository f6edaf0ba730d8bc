//! Prometheus metrics for monitoring
//!
//! Exposes metrics for:
//! - Estimates served per transaction kind and mode
//! - Estimation failures by reason
//! - Distribution of proposed budgets

use crate::error::{EstimatorError, EstimatorResult};
use crate::tx::{EstimationMode, TxKindTag};

use axum::{http::StatusCode, routing::get, Router};
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};
use std::net::SocketAddr;
use tracing::info;

lazy_static! {
    pub static ref ESTIMATES: CounterVec = register_counter_vec!(
        "gas_estimator_estimates_total",
        "Total gas budget estimates served",
        &["kind", "mode"]
    ).unwrap();

    pub static ref FAILURES: CounterVec = register_counter_vec!(
        "gas_estimator_failures_total",
        "Total failed estimates by reason",
        &["kind", "reason"]
    ).unwrap();

    pub static ref BUDGET: HistogramVec = register_histogram_vec!(
        "gas_estimator_budget",
        "Proposed gas budgets",
        &["kind"],
        vec![10.0, 100.0, 300.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0]
    ).unwrap();
}

/// Prometheus metrics server
pub struct MetricsServer {
    port: u16,
}

impl MetricsServer {
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    pub async fn run(&self) -> EstimatorResult<()> {
        let app = Router::new().route("/metrics", get(metrics_handler));

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Starting metrics server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| EstimatorError::Internal(format!("bind {}: {}", addr, e)))?;
        axum::serve(listener, app)
            .await
            .map_err(|e| EstimatorError::Internal(e.to_string()))?;

        Ok(())
    }
}

async fn metrics_handler() -> Result<String, (StatusCode, String)> {
    render().map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))
}

/// Text exposition of every registered metric
pub fn render() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| e.to_string())?;
    String::from_utf8(buffer).map_err(|e| e.to_string())
}

// Helper functions to record metrics

pub fn record_estimate(kind: TxKindTag, mode: EstimationMode, budget: u64) {
    ESTIMATES
        .with_label_values(&[kind.as_str(), mode.as_str()])
        .inc();
    BUDGET
        .with_label_values(&[kind.as_str()])
        .observe(budget as f64);
}

pub fn record_failure(kind: TxKindTag, error: &EstimatorError) {
    FAILURES
        .with_label_values(&[kind.as_str(), error.reason()])
        .inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_estimates_are_rendered() {
        record_estimate(TxKindTag::SplitCoin, EstimationMode::Normal, 10_000);
        record_failure(
            TxKindTag::PayNative,
            &EstimatorError::CoinSelection {
                requested: 5,
                available: 0,
            },
        );

        let text = render().unwrap();
        assert!(text.contains("gas_estimator_estimates_total{kind=\"split-coin\",mode=\"normal\"}"));
        assert!(text.contains("reason=\"coin_selection\""));
        assert!(text.contains("gas_estimator_budget_bucket"));
    }
}
