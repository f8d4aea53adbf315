use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

use models::{address, customer};

use crate::{
    domain::{
        CreatedCustomer, CustomerPayload, CustomerWithAddresses, DeletedCustomer, UpdatedCustomer,
    },
    errors::ServiceError,
    transaction::in_transaction,
};

/// Create a customer together with its first address.
///
/// Everything is validated up front; the duplicate check, both inserts and
/// the commit share one transaction.
#[instrument(skip_all)]
pub async fn create_customer(
    db: &DatabaseConnection,
    input: &CustomerPayload,
) -> Result<CreatedCustomer, ServiceError> {
    let customer_fields = input.customer.validate()?;
    let address_fields = input.address.validate()?;

    let created = in_transaction(db, "create_customer", move |txn| {
        Box::pin(async move {
            if let Some(existing) = customer::find_by_identity(txn, &customer_fields).await? {
                return Err(ServiceError::conflict(
                    "phone_number",
                    format!(
                        "customer {} {} with phone number {} already exists (id {})",
                        existing.first_name, existing.last_name, existing.phone_number, existing.id
                    ),
                ));
            }
            let c = customer::insert(txn, &customer_fields).await?;
            let a = address::insert(txn, c.id, &address_fields).await?;
            Ok(CreatedCustomer { customer_id: c.id, address_id: a.id })
        })
    })
    .await?;

    info!(customer_id = created.customer_id, address_id = created.address_id, "customer_created");
    Ok(created)
}

/// Overwrite a customer's name and phone; a supplied address is inserted as a
/// new row, never merged into an existing one.
#[instrument(skip(db, input))]
pub async fn update_customer(
    db: &DatabaseConnection,
    id: i32,
    input: &CustomerPayload,
) -> Result<UpdatedCustomer, ServiceError> {
    let customer_fields = input.customer.validate()?;
    let address_fields =
        if input.address.is_empty() { None } else { Some(input.address.validate()?) };

    let updated = in_transaction(db, "update_customer", move |txn| {
        Box::pin(async move {
            if customer::update_fields(txn, id, &customer_fields).await? == 0 {
                return Err(ServiceError::not_found("customer", id));
            }
            let address = match address_fields {
                Some(fields) => Some(address::insert(txn, id, &fields).await?),
                None => None,
            };
            Ok(UpdatedCustomer { customer_id: id, address })
        })
    })
    .await?;

    let address_id = updated.address.as_ref().map(|a| a.id);
    info!(customer_id = id, ?address_id, "customer_updated");
    Ok(updated)
}

/// Delete a customer and all of its addresses atomically.
#[instrument(skip(db))]
pub async fn delete_customer(
    db: &DatabaseConnection,
    id: i32,
) -> Result<DeletedCustomer, ServiceError> {
    let deleted = in_transaction(db, "delete_customer", move |txn| {
        Box::pin(async move {
            let addresses_removed = address::delete_for_customer(txn, id).await?;
            if customer::delete(txn, id).await? == 0 {
                return Err(ServiceError::not_found("customer", id));
            }
            Ok(DeletedCustomer { customer_id: id, addresses_removed })
        })
    })
    .await?;

    info!(customer_id = id, addresses_removed = deleted.addresses_removed, "customer_deleted");
    Ok(deleted)
}

/// One customer with its addresses nested (oldest first).
pub async fn get_customer(
    db: &DatabaseConnection,
    id: i32,
) -> Result<CustomerWithAddresses, ServiceError> {
    let customer = customer::find(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("customer", id))?;
    let addresses = address::list_for_customer(db, id).await?;
    Ok(CustomerWithAddresses { customer, addresses })
}
