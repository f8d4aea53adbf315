use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use service::{
    customer_query, customer_service,
    domain::{CustomerFilter, CustomerPayload, CustomerWithAddresses},
};

use crate::{errors::ApiError, routes::Data, state::AppState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive text matched against names, phone and address fields
    pub q: Option<String>,
    /// `single` or `multiple`
    #[serde(rename = "addressCount")]
    pub address_count: Option<String>,
}

impl ListQuery {
    fn filter(&self) -> Result<CustomerFilter, ApiError> {
        Ok(CustomerFilter::parse(self.q.as_deref(), self.address_count.as_deref())?)
    }
}

#[utoipa::path(
    post, path = "/customers", tag = "customers",
    request_body = crate::openapi::CustomerPayloadDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Duplicate customer")
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload?;
    let created = customer_service::create_customer(&state.db, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Customer created successfully",
            "customerId": created.customer_id,
            "addressId": created.address_id,
        })),
    ))
}

#[utoipa::path(
    get, path = "/customers", tag = "customers",
    params(ListQuery),
    responses((status = 200, description = "OK"), (status = 400, description = "Invalid filter"))
)]
pub async fn list_customers(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Data<Vec<CustomerWithAddresses>>>, ApiError> {
    let Query(q) = query?;
    let rows = customer_query::list_customers(&state.db, &q.filter()?).await?;
    info!(count = rows.len(), "list customers");
    Ok(Json(Data::new(rows)))
}

#[utoipa::path(
    get, path = "/customers/count", tag = "customers",
    params(ListQuery),
    responses((status = 200, description = "OK"), (status = 400, description = "Invalid filter"))
)]
pub async fn count_customers(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Data<u64>>, ApiError> {
    let Query(q) = query?;
    let n = customer_query::count_customers(&state.db, &q.filter()?).await?;
    Ok(Json(Data::new(n)))
}

#[utoipa::path(
    get, path = "/customers/search", tag = "customers",
    params(("q" = Option<String>, Query, description = "Search text; empty returns everyone")),
    responses((status = 200, description = "OK"))
)]
pub async fn search_customers(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Data<Vec<CustomerWithAddresses>>>, ApiError> {
    let Query(q) = query?;
    let rows = customer_query::search_customers(&state.db, q.q.as_deref()).await?;
    Ok(Json(Data::new(rows)))
}

#[utoipa::path(
    get, path = "/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get_customer(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Data<CustomerWithAddresses>>, ApiError> {
    let Path(id) = id?;
    let found = customer_service::get_customer(&state.db, id).await?;
    Ok(Json(Data::new(found)))
}

#[utoipa::path(
    put, path = "/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = crate::openapi::CustomerPayloadDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let updated = customer_service::update_customer(&state.db, id, &input).await?;
    let mut body = json!({
        "message": "Customer updated successfully",
        "customerId": updated.customer_id,
    });
    if let Some(address) = updated.address {
        body["addressId"] = json!(address.id);
        body["message"] = json!("Customer updated and address added successfully");
    }
    Ok(Json(body))
}

#[utoipa::path(
    delete, path = "/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let deleted = customer_service::delete_customer(&state.db, id).await?;
    Ok(Json(json!({
        "message": "Customer and associated addresses deleted successfully",
        "customerId": deleted.customer_id,
        "deletedAddresses": deleted.addresses_removed,
    })))
}
