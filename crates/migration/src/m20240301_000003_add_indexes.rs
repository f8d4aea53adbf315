use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Address: index on customer_id (nested reads, cascade delete, count filter)
        manager
            .create_index(
                Index::create()
                    .name("idx_address_customer")
                    .table(Address::Table)
                    .col(Address::CustomerId)
                    .to_owned(),
            )
            .await?;

        // Customer: duplicate lookup on create; not unique
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_identity")
                    .table(Customer::Table)
                    .col(Customer::FirstName)
                    .col(Customer::LastName)
                    .col(Customer::PhoneNumber)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_address_customer").table(Address::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_customer_identity").table(Customer::Table).to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Address { Table, CustomerId }

#[derive(DeriveIden)]
enum Customer { Table, FirstName, LastName, PhoneNumber }
