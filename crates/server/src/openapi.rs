use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(ToSchema)]
pub struct AddressInputDoc {
    pub address_details: String,
    pub city: String,
    pub state: String,
    /// Exactly 6 digits
    pub pin_code: String,
}

#[derive(ToSchema)]
pub struct NewAddressDoc {
    pub customer_id: i32,
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

/// Customer fields plus an address. The address is required on create and
/// optional on update.
#[derive(ToSchema)]
pub struct CustomerPayloadDoc {
    pub first_name: String,
    pub last_name: String,
    /// Exactly 10 digits
    pub phone_number: String,
    pub address_details: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub field: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::customers::create_customer,
        crate::routes::customers::list_customers,
        crate::routes::customers::count_customers,
        crate::routes::customers::search_customers,
        crate::routes::customers::get_customer,
        crate::routes::customers::update_customer,
        crate::routes::customers::delete_customer,
        crate::routes::addresses::create_address,
        crate::routes::addresses::create_customer_address,
        crate::routes::addresses::list_customer_addresses,
        crate::routes::addresses::update_address,
        crate::routes::addresses::delete_address,
    ),
    components(
        schemas(
            HealthResponse,
            AddressInputDoc,
            NewAddressDoc,
            CustomerPayloadDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "customers"),
        (name = "addresses")
    )
)]
pub struct ApiDoc;
