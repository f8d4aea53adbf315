//! Store schema for customers and their addresses.
//!
//! Entities, field validation and the connection-generic statements the
//! service layer composes into transactions.

pub mod errors;
pub mod db;
pub mod validation;
pub mod customer;
pub mod address;

#[cfg(test)]
mod tests;
