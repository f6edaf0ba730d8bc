//! HTTP API for gas budget estimates and health checks

use crate::coin;
use crate::config::ApiConfig;
use crate::error::{EstimatorError, EstimatorResult};
use crate::metrics;
use crate::tx::{
    is_insufficient_gas, EstimationMode, GasEstimator, GasSchedule, TransactionKind, TxKindTag,
};

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<GasEstimator>,
}

/// Build the API router
pub fn router(estimator: Arc<GasEstimator>) -> Router {
    let state = AppState { estimator };

    Router::new()
        .route("/health", get(health_check))
        .route("/schedule", get(get_schedule))
        .route("/estimate", post(estimate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP API server
pub async fn run_server(config: ApiConfig, estimator: Arc<GasEstimator>) -> EstimatorResult<()> {
    let app = router(estimator);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EstimatorError::Internal(format!("bind {}: {}", addr, e)))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| EstimatorError::Internal(e.to_string()))?;

    Ok(())
}

/// Health check endpoint - basic liveness
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Active gas schedule
async fn get_schedule(State(state): State<AppState>) -> Json<GasSchedule> {
    Json(state.estimator.schedule().clone())
}

/// Estimate a gas budget for one transaction
async fn estimate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EstimateResponse>, ApiError> {
    let request = parse_estimate_request(&body).map_err(|e| {
        warn!("Rejected estimate request: {}", e);
        ApiError(e)
    })?;
    let kind = request.transaction.tag();

    // fall back to the largest native coin among the pay coins
    let max_gas_coin_balance = request.max_gas_coin_balance.or_else(|| {
        request.transaction.pay_params().and_then(|p| {
            coin::max_balance_of_type(&p.coins, &state.estimator.schedule().native_coin_type)
        })
    });

    match state
        .estimator
        .estimate_with_mode(&request.transaction, request.mode, max_gas_coin_balance)
    {
        Ok(gas_budget) => {
            metrics::record_estimate(kind, request.mode, gas_budget);
            Ok(Json(EstimateResponse {
                gas_budget,
                insufficient_gas: is_insufficient_gas(max_gas_coin_balance, Some(gas_budget)),
            }))
        }
        Err(e) => {
            if e.is_caller_error() {
                warn!("Estimate for {} failed: {}", kind, e);
            } else {
                error!("Estimate for {} failed: {}", kind, e);
            }
            metrics::record_failure(kind, &e);
            Err(ApiError(e))
        }
    }
}

/// Decode an estimate request, checking the transaction kind tag first so an
/// unknown kind is reported as such rather than as a generic decode failure.
fn parse_estimate_request(body: &[u8]) -> EstimatorResult<EstimateRequest> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| EstimatorError::InvalidRequest(e.to_string()))?;

    let kind = value
        .pointer("/transaction/kind")
        .and_then(|k| k.as_str())
        .ok_or_else(|| {
            EstimatorError::InvalidRequest("missing string field transaction.kind".to_string())
        })?;
    kind.parse::<TxKindTag>()?;

    serde_json::from_value(value).map_err(|e| EstimatorError::InvalidRequest(e.to_string()))
}

/// Estimation error rendered as a JSON body
pub struct ApiError(pub EstimatorError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            EstimatorError::CoinSelection { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            e if e.is_caller_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

// Request/response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub transaction: TransactionKind,
    #[serde(default)]
    pub mode: EstimationMode,
    #[serde(default)]
    pub max_gas_coin_balance: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub gas_budget: u64,
    pub insufficient_gas: Option<bool>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}
