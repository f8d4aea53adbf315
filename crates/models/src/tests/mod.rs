use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, migrate, DatabaseConfig};
use crate::{address, customer};



/// Fresh, migrated in-memory database per test.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migrate(&db).await?;
    Ok(db)
}

pub(crate) fn customer_fields(first: &str, last: &str, phone: &str) -> customer::Fields {
    customer::Fields::new(Some(first), Some(last), Some(phone)).expect("valid customer fields")
}

pub(crate) fn address_fields(city: &str, pin: &str) -> address::Fields {
    address::Fields::new(Some("221B Baker Street"), Some(city), Some("MH"), Some(pin))
        .expect("valid address fields")
}
