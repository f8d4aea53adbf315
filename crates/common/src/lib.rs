//! Pieces shared by the server binary and the library crates.

pub mod types;
pub mod utils;
