//! Customer Preference Model

use serde::{Deserialize, Serialize};

/// Customer preference entity
///
/// Key/value pair scoped to one customer; `key` is unique per customer
/// and writes through `set_preference` upsert by key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CustomerPreference {
    pub customer_id: i64,
    pub key: String,
    pub value: String,
    pub category: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create preference payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceCreate {
    pub customer_id: i64,
    pub key: String,
    pub value: String,
    pub category: String,
}
