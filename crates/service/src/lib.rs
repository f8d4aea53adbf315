//! Service layer for customers and their addresses.
//! - Validates payloads before touching the store.
//! - Groups multi-table mutations into one transaction scope.
//! - Shapes customer rows with their addresses nested for the API.

pub mod errors;
pub mod domain;
pub mod transaction;
pub mod customer_service;
pub mod customer_query;
pub mod address_service;
#[cfg(test)]
mod test_support;
