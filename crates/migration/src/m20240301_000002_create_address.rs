//! Create `address` table with FK to `customer`.
//!
//! The FK restricts deletes; removing a customer's addresses first is the
//! service's job.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Address::Table)
                    .if_not_exists()
                    .col(pk_auto(Address::Id))
                    .col(integer(Address::CustomerId).not_null())
                    .col(text(Address::AddressDetails).not_null())
                    .col(string_len(Address::City, 100).not_null())
                    .col(string_len(Address::State, 100).not_null())
                    .col(string_len(Address::PinCode, 6).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_address_customer")
                            .from(Address::Table, Address::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Address::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Address { Table, Id, CustomerId, AddressDetails, City, State, PinCode }

#[derive(DeriveIden)]
enum Customer { Table, Id }
