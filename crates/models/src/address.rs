use sea_orm::{entity::prelude::*, sea_query::Expr, ConnectionTrait, NotSet, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::{customer, errors::ModelError, validation};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "address")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    #[sea_orm(column_type = "Text")]
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(customer::Entity)
                .from(Column::CustomerId)
                .to(customer::Column::Id)
                .into(),
        }
    }
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Validated address columns (everything except the owning customer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fields {
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

impl Fields {
    pub fn new(
        address_details: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
        pin_code: Option<&str>,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            address_details: validation::required("address_details", address_details)?,
            city: validation::required("city", city)?,
            state: validation::required("state", state)?,
            pin_code: validation::pin_code(pin_code)?,
        })
    }
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    customer_id: i32,
    fields: &Fields,
) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: NotSet,
        customer_id: Set(customer_id),
        address_details: Set(fields.address_details.clone()),
        city: Set(fields.city.clone()),
        state: Set(fields.state.clone()),
        pin_code: Set(fields.pin_code.clone()),
    };
    Ok(am.insert(conn).await?)
}

/// Overwrite every address column; `None` when no row has that id.
///
/// The row is read back after the update so the same statement works on
/// backends without `RETURNING`.
pub async fn update_fields<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    fields: &Fields,
) -> Result<Option<Model>, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::AddressDetails, Expr::value(fields.address_details.clone()))
        .col_expr(Column::City, Expr::value(fields.city.clone()))
        .col_expr(Column::State, Expr::value(fields.state.clone()))
        .col_expr(Column::PinCode, Expr::value(fields.pin_code.clone()))
        .filter(Column::Id.eq(id))
        .exec(conn)
        .await?;
    if res.rows_affected == 0 {
        return Ok(None);
    }
    Ok(Entity::find_by_id(id).one(conn).await?)
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64, ModelError> {
    let res = Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}

pub async fn delete_for_customer<C: ConnectionTrait>(
    conn: &C,
    customer_id: i32,
) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::CustomerId.eq(customer_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn list_for_customer<C: ConnectionTrait>(
    conn: &C,
    customer_id: i32,
) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .filter(Column::CustomerId.eq(customer_id))
        .order_by_asc(Column::Id)
        .all(conn)
        .await?;
    Ok(rows)
}
