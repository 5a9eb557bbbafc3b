//! Customer Preference Repository
//!
//! Dictionary-style key/value storage per customer. `set_preference`
//! upserts by key; the staged add/save path inserts like the other
//! repositories and surfaces duplicate keys as a persistence error.

use super::{RepoError, RepoResult, StagedRepository};
use parking_lot::Mutex;
use shared::models::{CustomerPreference, PreferenceCreate};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;

const PREFERENCE_SELECT: &str = "SELECT customer_id, key, value, category, created_at, updated_at FROM customer_preference";

#[derive(Clone)]
pub struct PreferenceRepository {
    pool: SqlitePool,
    staged: Arc<Mutex<Vec<CustomerPreference>>>,
}

impl PreferenceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            staged: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All preferences of a customer, in insertion order
    pub async fn find_by_customer_id(
        &self,
        customer_id: i64,
    ) -> RepoResult<Vec<CustomerPreference>> {
        let sql = format!("{PREFERENCE_SELECT} WHERE customer_id = ? ORDER BY rowid");
        let rows = sqlx::query_as::<_, CustomerPreference>(&sql)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Upsert a preference by key: overwrite the value and category if
    /// the key exists for this customer, insert otherwise.
    pub async fn set_preference(
        &self,
        customer_id: i64,
        key: &str,
        value: &str,
        category: &str,
    ) -> RepoResult<CustomerPreference> {
        if key.trim().is_empty() {
            return Err(RepoError::Validation(
                "Preference key must not be empty".into(),
            ));
        }
        let now = shared::util::now_millis();
        sqlx::query(
            "INSERT INTO customer_preference (customer_id, key, value, category, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5) ON CONFLICT(customer_id, key) DO UPDATE SET value = excluded.value, category = excluded.category, updated_at = excluded.updated_at",
        )
        .bind(customer_id)
        .bind(key)
        .bind(value)
        .bind(category)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let sql = format!("{PREFERENCE_SELECT} WHERE customer_id = ? AND key = ?");
        sqlx::query_as::<_, CustomerPreference>(&sql)
            .bind(customer_id)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to set preference".into()))
    }

    /// Key -> value map derived from the full preference list.
    /// Keys are unique per customer, so no entry is ever shadowed.
    pub async fn preferences_dictionary(
        &self,
        customer_id: i64,
    ) -> RepoResult<HashMap<String, String>> {
        let prefs = self.find_by_customer_id(customer_id).await?;
        Ok(prefs.into_iter().map(|p| (p.key, p.value)).collect())
    }
}

impl StagedRepository<CustomerPreference, PreferenceCreate> for PreferenceRepository {
    fn add(&self, data: PreferenceCreate) -> RepoResult<CustomerPreference> {
        if data.key.trim().is_empty() {
            return Err(RepoError::Validation(
                "Preference key must not be empty".into(),
            ));
        }
        let now = shared::util::now_millis();
        let preference = CustomerPreference {
            customer_id: data.customer_id,
            key: data.key,
            value: data.value,
            category: data.category,
            created_at: now,
            updated_at: now,
        };
        self.staged.lock().push(preference.clone());
        Ok(preference)
    }

    async fn save_changes(&self) -> RepoResult<usize> {
        let staged: Vec<CustomerPreference> = self.staged.lock().clone();
        if staged.is_empty() {
            return Ok(0);
        }
        let mut tx = self.pool.begin().await?;
        for p in &staged {
            sqlx::query(
                "INSERT INTO customer_preference (customer_id, key, value, category, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(p.customer_id)
            .bind(&p.key)
            .bind(&p.value)
            .bind(&p.category)
            .bind(p.created_at)
            .bind(p.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        // Remove only the committed prefix; rows staged during the
        // commit await stay staged for the next save
        self.staged.lock().drain(..staged.len());
        Ok(staged.len())
    }
}
