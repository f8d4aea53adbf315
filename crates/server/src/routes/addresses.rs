use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use models::address;
use service::{
    address_service,
    domain::{AddressInput, NewAddress},
};

use crate::{errors::ApiError, routes::Data, state::AppState};

#[utoipa::path(
    post, path = "/addresses", tag = "addresses",
    request_body = crate::openapi::NewAddressDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn create_address(
    State(state): State<AppState>,
    payload: Result<Json<NewAddress>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload?;
    created(address_service::create_address(&state.db, &input).await?)
}

#[utoipa::path(
    post, path = "/customers/{id}/addresses", tag = "addresses",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = crate::openapi::AddressInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn create_customer_address(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<AddressInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Path(customer_id) = id?;
    let Json(address) = payload?;
    let input = NewAddress { customer_id: Some(customer_id), address };
    created(address_service::create_address(&state.db, &input).await?)
}

#[utoipa::path(
    get, path = "/customers/{id}/addresses", tag = "addresses",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn list_customer_addresses(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Data<Vec<address::Model>>>, ApiError> {
    let Path(customer_id) = id?;
    let rows = address_service::list_addresses(&state.db, customer_id).await?;
    Ok(Json(Data::new(rows)))
}

#[utoipa::path(
    put, path = "/addresses/{id}", tag = "addresses",
    params(("id" = i32, Path, description = "Address ID")),
    request_body = crate::openapi::AddressInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_address(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<AddressInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let updated = address_service::update_address(&state.db, id, &input).await?;
    Ok(Json(json!({ "message": "Address updated successfully", "data": updated })))
}

#[utoipa::path(
    delete, path = "/addresses/{id}", tag = "addresses",
    params(("id" = i32, Path, description = "Address ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete_address(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    address_service::delete_address(&state.db, id).await?;
    Ok(Json(json!({ "message": "Address deleted successfully", "addressId": id })))
}

fn created(address: address::Model) -> Result<(StatusCode, Json<Value>), ApiError> {
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Address created successfully", "data": address })),
    ))
}
