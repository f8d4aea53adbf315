use sea_orm::{entity::prelude::*, sea_query::Expr, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{address, errors::ModelError, validation};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Address,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Address => Entity::has_many(address::Entity).into(),
        }
    }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Validated customer columns, trimmed and ready to write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fields {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl Fields {
    /// Checks run in column order; the first failure wins.
    pub fn new(
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone_number: Option<&str>,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            first_name: validation::required("first_name", first_name)?,
            last_name: validation::required("last_name", last_name)?,
            phone_number: validation::phone_number(phone_number)?,
        })
    }
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(conn).await?)
}

/// Existing customer with the same name and phone, if any.
pub async fn find_by_identity<C: ConnectionTrait>(
    conn: &C,
    fields: &Fields,
) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::FirstName.eq(fields.first_name.as_str()))
        .filter(Column::LastName.eq(fields.last_name.as_str()))
        .filter(Column::PhoneNumber.eq(fields.phone_number.as_str()))
        .one(conn)
        .await?;
    Ok(found)
}

pub async fn insert<C: ConnectionTrait>(conn: &C, fields: &Fields) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: NotSet,
        first_name: Set(fields.first_name.clone()),
        last_name: Set(fields.last_name.clone()),
        phone_number: Set(fields.phone_number.clone()),
    };
    Ok(am.insert(conn).await?)
}

/// Overwrites name and phone; returns the number of rows touched (0 when the id is unknown).
pub async fn update_fields<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    fields: &Fields,
) -> Result<u64, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::FirstName, Expr::value(fields.first_name.clone()))
        .col_expr(Column::LastName, Expr::value(fields.last_name.clone()))
        .col_expr(Column::PhoneNumber, Expr::value(fields.phone_number.clone()))
        .filter(Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Deletes the customer row only. Addresses must be gone already (FK restrict).
pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64, ModelError> {
    let res = Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
