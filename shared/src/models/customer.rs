//! Customer Model

use serde::{Deserialize, Serialize};

use super::membership::CustomerMembership;
use super::preference::CustomerPreference;

/// Customer entity (会员顾客)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Unique lookup key for the customer
    pub phone: String,
    pub email: Option<String>,
    pub membership_number: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub membership_number: Option<String>,
}

/// Customer with membership and preferences eagerly loaded
/// (for mobile-number lookup)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer: Customer,
    pub membership: Option<CustomerMembership>,
    /// Preferences in insertion order
    pub preferences: Vec<CustomerPreference>,
}
