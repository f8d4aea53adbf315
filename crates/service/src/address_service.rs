use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

use models::{address, customer};

use crate::{
    domain::{AddressInput, NewAddress},
    errors::ServiceError,
};

/// Add an address to an existing customer.
#[instrument(skip_all, fields(customer_id = ?input.customer_id))]
pub async fn create_address(
    db: &DatabaseConnection,
    input: &NewAddress,
) -> Result<address::Model, ServiceError> {
    let customer_id = input
        .customer_id
        .ok_or_else(|| ServiceError::validation("customer_id", "customer_id is required"))?;
    let fields = input.address.validate()?;

    if customer::find(db, customer_id).await?.is_none() {
        return Err(ServiceError::not_found("customer", customer_id));
    }
    let created = address::insert(db, customer_id, &fields).await?;
    info!(address_id = created.id, customer_id, "address_created");
    Ok(created)
}

/// Replace every column of one address.
#[instrument(skip(db, input))]
pub async fn update_address(
    db: &DatabaseConnection,
    id: i32,
    input: &AddressInput,
) -> Result<address::Model, ServiceError> {
    let fields = input.validate()?;
    let updated = address::update_fields(db, id, &fields)
        .await?
        .ok_or_else(|| ServiceError::not_found("address", id))?;
    info!(address_id = id, "address_updated");
    Ok(updated)
}

/// Delete one address; no existence pre-check, the affected row count decides.
#[instrument(skip(db))]
pub async fn delete_address(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    if address::delete(db, id).await? == 0 {
        return Err(ServiceError::not_found("address", id));
    }
    info!(address_id = id, "address_deleted");
    Ok(())
}

/// All addresses of a customer, oldest first. Unknown customer is not-found.
pub async fn list_addresses(
    db: &DatabaseConnection,
    customer_id: i32,
) -> Result<Vec<address::Model>, ServiceError> {
    if customer::find(db, customer_id).await?.is_none() {
        return Err(ServiceError::not_found("customer", customer_id));
    }
    Ok(address::list_for_customer(db, customer_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{customer_fields, get_db};

    fn input(city: &str, pin: &str) -> AddressInput {
        AddressInput {
            address_details: Some("Flat 4, Lake View".into()),
            city: Some(city.into()),
            state: Some("KA".into()),
            pin_code: Some(pin.into()),
        }
    }

    #[tokio::test]
    async fn address_lifecycle() -> anyhow::Result<()> {
        let db = get_db().await?;
        let c = customer::insert(&db, &customer_fields("Lata", "Nair", "9988776655")).await?;

        let new = NewAddress { customer_id: Some(c.id), address: input("Mysuru", "570001") };
        let created = create_address(&db, &new).await?;
        assert_eq!(created.customer_id, c.id);
        assert_eq!(created.city, "Mysuru");

        let updated = update_address(&db, created.id, &input("Bengaluru", "560001")).await?;
        assert_eq!(updated.city, "Bengaluru");
        assert_eq!(list_addresses(&db, c.id).await?, vec![updated]);

        delete_address(&db, created.id).await?;
        assert!(list_addresses(&db, c.id).await?.is_empty());
        // the customer survives its addresses
        assert!(customer::find(&db, c.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_known_customer_and_valid_fields() -> anyhow::Result<()> {
        let db = get_db().await?;

        let new = NewAddress { customer_id: None, address: input("Mysuru", "570001") };
        let err = create_address(&db, &new).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { field: Some("customer_id"), .. }));

        let new = NewAddress { customer_id: Some(41), address: input("Mysuru", "570001") };
        let err = create_address(&db, &new).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let c = customer::insert(&db, &customer_fields("Lata", "Nair", "9988776655")).await?;
        let new = NewAddress { customer_id: Some(c.id), address: input("Mysuru", "57000") };
        let err = create_address(&db, &new).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { field: Some("pin_code"), .. }));
        assert!(list_addresses(&db, c.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() -> anyhow::Result<()> {
        let db = get_db().await?;
        let goa = input("Goa", "403001");
        assert!(matches!(update_address(&db, 5, &goa).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_address(&db, 5).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(list_addresses(&db, 5).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
