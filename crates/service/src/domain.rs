//! Request and response shapes for customer and address operations.

use std::str::FromStr;

use models::{address, customer, errors::ModelError};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Raw customer columns as they arrive in a request body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CustomerInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl CustomerInput {
    pub fn validate(&self) -> Result<customer::Fields, ModelError> {
        customer::Fields::new(
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.phone_number.as_deref(),
        )
    }
}

/// Raw address columns as they arrive in a request body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AddressInput {
    #[serde(default)]
    pub address_details: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pin_code: Option<String>,
}

impl AddressInput {
    /// No address field carries a value.
    pub fn is_empty(&self) -> bool {
        [&self.address_details, &self.city, &self.state, &self.pin_code]
            .iter()
            .all(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    }

    pub fn validate(&self) -> Result<address::Fields, ModelError> {
        address::Fields::new(
            self.address_details.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.pin_code.as_deref(),
        )
    }
}

/// Body of `POST /customers` and `PUT /customers/:id`.
///
/// On create the address is mandatory; on update it is optional and, when
/// present, added as a new row.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CustomerPayload {
    #[serde(flatten)]
    pub customer: CustomerInput,
    #[serde(flatten)]
    pub address: AddressInput,
}

/// Body of `POST /addresses`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewAddress {
    #[serde(default)]
    pub customer_id: Option<i32>,
    #[serde(flatten)]
    pub address: AddressInput,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CustomerWithAddresses {
    #[serde(flatten)]
    pub customer: customer::Model,
    pub addresses: Vec<address::Model>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedCustomer {
    pub customer_id: i32,
    pub address_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedCustomer {
    pub customer_id: i32,
    pub address: Option<address::Model>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletedCustomer {
    pub customer_id: i32,
    pub addresses_removed: u64,
}

/// `addressCount` query filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressCount {
    /// exactly one address
    Single,
    /// two or more
    Multiple,
}

impl FromStr for AddressCount {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            other => Err(ServiceError::validation(
                "addressCount",
                format!("addressCount must be 'single' or 'multiple', got '{other}'"),
            )),
        }
    }
}

/// Filters shared by the customer list and the customer count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    /// Case-insensitive substring, already trimmed; `None` matches everyone.
    pub search: Option<String>,
    pub address_count: Option<AddressCount>,
}

impl CustomerFilter {
    /// Blank values count as absent.
    pub fn parse(q: Option<&str>, address_count: Option<&str>) -> Result<Self, ServiceError> {
        let search = q.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        let address_count = match address_count.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse()?),
            None => None,
        };
        Ok(Self { search, address_count })
    }

    pub fn search(q: Option<&str>) -> Self {
        Self {
            search: q.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string),
            address_count: None,
        }
    }
}
