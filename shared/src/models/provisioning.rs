//! Provisioning Models (business creation workflow)

use serde::{Deserialize, Serialize};

/// Application user entity (business owner account)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AppUser {
    pub id: i64,
    pub username: String,
    pub is_active: bool,
    pub created_at: i64,
}

/// Business entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub business_type: String,
    pub owner_id: i64,
    pub created_at: i64,
}

/// Shop entity (one business owns many shops)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Shop {
    pub id: i64,
    pub business_id: i64,
    pub name: String,
    /// Optional custom attributes, serialized JSON
    pub attributes: Option<String>,
    pub created_at: i64,
}

/// Business creation workflow request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessCreationRequest {
    pub business_name: String,
    pub business_type: String,
    pub owner_username: String,
    pub number_of_shops: u32,
    /// Custom attributes applied to every created shop
    pub shop_attributes: Option<serde_json::Value>,
}
