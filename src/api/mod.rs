mod error;

use axum::{
    Router,
    extract::{Json, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::ServerConfig;
use crate::core::{
    AmortizationRequest, ProjectionRequest, Rental, monthly_payment, run_amortization_schedule,
    run_projection, summarize_rental_cash_flow,
};

pub use error::ApiError;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentRequest {
    principal: f64,
    interest_rate: f64,
    years: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentResponse {
    monthly_payment: f64,
}

#[derive(Debug, Deserialize)]
struct RentalCashFlowRequest {
    rentals: Vec<Rental>,
}

pub fn build_router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/calculate-amortization", post(amortization_handler))
        .route("/api/calculate-projections", post(projection_handler))
        .route("/api/calculate-payment", post(payment_handler))
        .route("/api/rental-cash-flow", post(rental_cash_flow_handler))
        .fallback(not_found_handler)
        .layer(cors)
}

pub async fn run_http_server(config: &ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Flow & Grow API listening");
    info!("Local access: http://127.0.0.1:{}/api/health", config.addr.port());

    axum::serve(listener, build_router()).await
}

async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

async fn not_found_handler() -> Response {
    ApiError::NotFound.into_response()
}

async fn amortization_handler(
    payload: Result<Json<AmortizationRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let schedule = run_amortization_schedule(&request);
    info!(points = schedule.len(), "amortization schedule served");
    Ok(json_response(StatusCode::OK, schedule))
}

async fn projection_handler(
    payload: Result<Json<ProjectionRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let result = run_projection(&request);
    info!(
        buckets = request.contributions.len(),
        rentals = request.rentals.len(),
        snapshots = result.snapshots.len(),
        "projection served"
    );
    Ok(json_response(StatusCode::OK, result))
}

async fn payment_handler(
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let response = PaymentResponse {
        monthly_payment: monthly_payment(request.principal, request.interest_rate, request.years),
    };
    Ok(json_response(StatusCode::OK, response))
}

async fn rental_cash_flow_handler(
    payload: Result<Json<RentalCashFlowRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    Ok(json_response(
        StatusCode::OK,
        summarize_rental_cash_flow(&request.rentals),
    ))
}

pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}
