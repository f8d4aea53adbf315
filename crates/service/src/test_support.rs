use sea_orm::DatabaseConnection;
use models::{
    address, customer,
    db::{connect_with_config, migrate, DatabaseConfig},
};

use crate::domain::{AddressInput, CustomerInput, CustomerPayload};

/// Fresh migrated in-memory store. The pool holds exactly one connection, so
/// an operation that fails to release it stalls every later call.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut cfg = DatabaseConfig::in_memory();
    cfg.acquire_timeout = std::time::Duration::from_secs(2);
    let db = connect_with_config(&cfg).await?;
    migrate(&db).await?;
    Ok(db)
}

pub fn payload(first: &str, last: &str, phone: &str, pin: &str) -> CustomerPayload {
    CustomerPayload {
        customer: CustomerInput {
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            phone_number: Some(phone.into()),
        },
        address: AddressInput {
            address_details: Some("221B Baker Street".into()),
            city: Some("Pune".into()),
            state: Some("MH".into()),
            pin_code: Some(pin.into()),
        },
    }
}

pub fn customer_fields(first: &str, last: &str, phone: &str) -> customer::Fields {
    customer::Fields::new(Some(first), Some(last), Some(phone)).expect("valid customer fields")
}

pub fn address_fields(city: &str, pin: &str) -> address::Fields {
    address::Fields::new(Some("221B Baker Street"), Some(city), Some("MH"), Some(pin))
        .expect("valid address fields")
}
