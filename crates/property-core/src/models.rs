//! Domain records: owners, properties, images and sale traces.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tax_policy::TaxPolicy;

/// Longest buyer label accepted on a trace
pub const MAX_TRACE_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub photo: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerInput {
    pub name: String,
    pub address: Option<String>,
    pub photo: Option<String>,
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub price: Decimal,
    pub code_internal: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyInput {
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub price: Decimal,
    pub code_internal: String,
    pub year: i32,
    /// Stored as the main image when not blank
    pub image_url: Option<String>,
    pub image_enabled: bool,
}

/// Search criteria for properties. Empty fields do not filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyFilter {
    pub name: Option<String>,
    pub address: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub owner_id: Option<String>,
}

impl PropertyFilter {
    /// Price bounds are inclusive
    pub fn matches_price(&self, price: Decimal) -> bool {
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }

    /// Name and address match case-insensitively on substrings
    pub fn matches(&self, property: &Property) -> bool {
        contains_ignore_case(&property.name, self.name.as_deref())
            && contains_ignore_case(&property.address, self.address.as_deref())
            && self.matches_price(property.price)
            && self
                .owner_id
                .as_deref()
                .filter(|id| !id.trim().is_empty())
                .map_or(true, |id| property.owner_id == id)
    }
}

/// Blank needles match everything
pub fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle.map(str::trim) {
        None | Some("") => true,
        Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
    }
}

/// Property row as shown in listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyListItem {
    #[serde(flatten)]
    pub property: Property,
    pub image_url: Option<String>,
    pub has_transactions: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyImage {
    pub id: String,
    pub property_id: String,
    pub file: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One historical sale of a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTrace {
    pub id: String,
    pub property_id: String,
    pub sale_date: DateTime<Utc>,
    /// Buyer label
    pub name: String,
    pub value: Decimal,
    pub tax: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update request for a trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceInput {
    pub property_id: String,
    pub sale_date: DateTime<Utc>,
    pub name: Option<String>,
    pub value: Decimal,
    /// Derived from `value` when absent
    pub tax: Option<Decimal>,
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Property reference is required")]
    MissingProperty,

    #[error("Value must be greater than or equal to 0, got {0}")]
    NegativeValue(Decimal),

    #[error("Tax must be greater than or equal to 0, got {0}")]
    NegativeTax(Decimal),

    #[error("Name cannot exceed {max} characters (got {len})")]
    NameTooLong { len: usize, max: usize },
}

impl TraceInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.property_id.trim().is_empty() {
            return Err(ValidationError::MissingProperty);
        }
        if self.value < Decimal::ZERO {
            return Err(ValidationError::NegativeValue(self.value));
        }
        if let Some(tax) = self.tax {
            if tax < Decimal::ZERO {
                return Err(ValidationError::NegativeTax(tax));
            }
        }
        if let Some(name) = &self.name {
            let len = name.chars().count();
            if len > MAX_TRACE_NAME_LEN {
                return Err(ValidationError::NameTooLong {
                    len,
                    max: MAX_TRACE_NAME_LEN,
                });
            }
        }
        Ok(())
    }

    /// Tax to store for this request: the explicit one, or the policy's
    pub fn resolved_tax(&self, policy: &TaxPolicy) -> Decimal {
        self.tax.unwrap_or_else(|| policy.compute_tax(self.value))
    }

    /// Build the stored record under `id`
    pub fn into_trace(self, id: String, policy: &TaxPolicy, now: DateTime<Utc>) -> PropertyTrace {
        let tax = self.resolved_tax(policy);
        PropertyTrace {
            id,
            property_id: self.property_id,
            sale_date: self.sale_date,
            name: self.name.unwrap_or_default(),
            value: self.value,
            tax,
            created_at: now,
            updated_at: None,
        }
    }
}
