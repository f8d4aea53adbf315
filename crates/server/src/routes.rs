use axum::{
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::{errors::{handle_panic, ApiError}, openapi::ApiDoc, state::AppState};

pub mod addresses;
pub mod customers;

/// Read envelope: `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "OK", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let customers = Router::new()
        .route("/customers", get(customers::list_customers).post(customers::create_customer))
        .route("/customers/count", get(customers::count_customers))
        .route("/customers/search", get(customers::search_customers))
        .route(
            "/customers/:id",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route(
            "/customers/:id/addresses",
            get(addresses::list_customer_addresses).post(addresses::create_customer_address),
        );

    let addresses = Router::new()
        .route("/addresses", post(addresses::create_address))
        .route("/addresses/:id", put(addresses::update_address).delete(addresses::delete_address));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(customers)
        .merge(addresses)
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

pub fn default_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}
