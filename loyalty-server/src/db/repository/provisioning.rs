//! Provisioning Repository
//!
//! Creation functions backing the business creation workflow. Each
//! call commits immediately; the workflow has no rollback, so a later
//! failure leaves earlier rows in place.

use super::{RepoError, RepoResult};
use shared::models::{AppUser, Business, Shop};
use sqlx::SqlitePool;

pub async fn create_user(pool: &SqlitePool, username: &str) -> RepoResult<AppUser> {
    if username.trim().is_empty() {
        return Err(RepoError::Validation("Username must not be empty".into()));
    }
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO app_user (id, username, is_active, created_at) VALUES (?1, ?2, 1, ?3)")
        .bind(id)
        .bind(username)
        .bind(now)
        .execute(pool)
        .await?;
    find_user_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn find_user_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<AppUser>> {
    let row = sqlx::query_as::<_, AppUser>(
        "SELECT id, username, is_active, created_at FROM app_user WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create_business(
    pool: &SqlitePool,
    name: &str,
    business_type: &str,
    owner_id: i64,
) -> RepoResult<Business> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO business (id, name, business_type, owner_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(name)
    .bind(business_type)
    .bind(owner_id)
    .bind(now)
    .execute(pool)
    .await?;
    let row = sqlx::query_as::<_, Business>(
        "SELECT id, name, business_type, owner_id, created_at FROM business WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| RepoError::Database("Failed to create business".into()))
}

pub async fn create_shop(
    pool: &SqlitePool,
    business_id: i64,
    name: &str,
    attributes: Option<&serde_json::Value>,
) -> RepoResult<Shop> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let attributes_json = attributes.map(|a| a.to_string());
    sqlx::query(
        "INSERT INTO shop (id, business_id, name, attributes, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(business_id)
    .bind(name)
    .bind(&attributes_json)
    .bind(now)
    .execute(pool)
    .await?;
    let row = sqlx::query_as::<_, Shop>(
        "SELECT id, business_id, name, attributes, created_at FROM shop WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| RepoError::Database("Failed to create shop".into()))
}

pub async fn find_shops_by_business_id(
    pool: &SqlitePool,
    business_id: i64,
) -> RepoResult<Vec<Shop>> {
    let rows = sqlx::query_as::<_, Shop>(
        "SELECT id, business_id, name, attributes, created_at FROM shop WHERE business_id = ? ORDER BY created_at",
    )
    .bind(business_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
