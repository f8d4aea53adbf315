//! Customer list, search and count.
//!
//! List and count are both built from [`filter_condition`], so for a given
//! [`CustomerFilter`] the count always equals the length of the list.

use sea_orm::{
    sea_query::{BinOper, Expr, Func, IntoColumnRef, Query, SelectStatement, SimpleExpr},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use tracing::debug;

use models::{address, customer};

use crate::{
    domain::{AddressCount, CustomerFilter, CustomerWithAddresses},
    errors::ServiceError,
};

const ESCAPE: char = '\\';

/// Customers matching `filter`, newest first, each with its addresses nested.
pub async fn list_customers(
    db: &DatabaseConnection,
    filter: &CustomerFilter,
) -> Result<Vec<CustomerWithAddresses>, ServiceError> {
    let customers = customer::Entity::find()
        .filter(filter_condition(filter))
        .order_by_desc(customer::Column::Id)
        .all(db)
        .await?;
    let addresses = customers
        .load_many(address::Entity::find().order_by_asc(address::Column::Id), db)
        .await?;
    debug!(rows = customers.len(), ?filter, "customers listed");
    Ok(nest(customers, addresses))
}

/// Free-text search with no address-count filter.
pub async fn search_customers(
    db: &DatabaseConnection,
    q: Option<&str>,
) -> Result<Vec<CustomerWithAddresses>, ServiceError> {
    list_customers(db, &CustomerFilter::search(q)).await
}

pub async fn count_customers(
    db: &DatabaseConnection,
    filter: &CustomerFilter,
) -> Result<u64, ServiceError> {
    let n = customer::Entity::find().filter(filter_condition(filter)).count(db).await?;
    Ok(n)
}

/// WHERE clause on `customer` for the given filter.
///
/// The search term matches customer columns directly and address columns
/// through a sub-select, so no join rows ever reach the result. The address
/// count is taken over all of a customer's addresses, not just the ones that
/// matched the search.
pub fn filter_condition(filter: &CustomerFilter) -> Condition {
    let mut cond = Condition::all();

    if let Some(term) = &filter.search {
        let pattern = like_pattern(term);
        let mut address_hit = Condition::any();
        for col in [
            address::Column::AddressDetails,
            address::Column::City,
            address::Column::State,
            address::Column::PinCode,
        ] {
            address_hit = address_hit.add(lower_like((address::Entity, col), &pattern));
        }
        let addresses_matching = Query::select()
            .column(address::Column::CustomerId)
            .from(address::Entity)
            .cond_where(address_hit)
            .to_owned();

        let mut any = Condition::any();
        for col in
            [customer::Column::FirstName, customer::Column::LastName, customer::Column::PhoneNumber]
        {
            any = any.add(lower_like((customer::Entity, col), &pattern));
        }
        cond = cond.add(any.add(customer::Column::Id.in_subquery(addresses_matching)));
    }

    if let Some(count) = filter.address_count {
        cond = cond.add(customer::Column::Id.in_subquery(customers_with_address_count(count)));
    }

    cond
}

fn customers_with_address_count(count: AddressCount) -> SelectStatement {
    let n = Expr::expr(Func::count(Expr::col((address::Entity, address::Column::Id))));
    let having = match count {
        AddressCount::Single => n.eq(1),
        AddressCount::Multiple => n.gt(1),
    };
    Query::select()
        .column(address::Column::CustomerId)
        .from(address::Entity)
        .group_by_col(address::Column::CustomerId)
        .and_having(having)
        .to_owned()
}

/// `LOWER(col) LIKE LOWER(pattern) ESCAPE '\'`.
///
/// Both sides are folded by the database, so the term and the column always
/// get the same case mapping (ASCII-only on SQLite, locale-aware on Postgres).
fn lower_like<C: IntoColumnRef>(col: C, pattern: &str) -> SimpleExpr {
    let lowered_pattern = SimpleExpr::Binary(
        Box::new(Func::lower(Expr::val(pattern)).into()),
        BinOper::Escape,
        Box::new(SimpleExpr::Constant(ESCAPE.into())),
    );
    Expr::expr(Func::lower(Expr::col(col))).binary(BinOper::Like, lowered_pattern)
}

/// `%term%` with LIKE wildcards in the term taken literally.
fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | ESCAPE) {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out.push('%');
    out
}

/// Zip customers with the per-customer address lists produced by the loader.
fn nest(
    customers: Vec<customer::Model>,
    addresses: Vec<Vec<address::Model>>,
) -> Vec<CustomerWithAddresses> {
    customers
        .into_iter()
        .zip(addresses)
        .map(|(customer, addresses)| CustomerWithAddresses { customer, addresses })
        .collect()
}
