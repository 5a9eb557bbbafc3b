//! Customer Repository

use super::{RepoError, RepoResult, StagedRepository};
use parking_lot::Mutex;
use shared::models::{
    Customer, CustomerCreate, CustomerMembership, CustomerPreference, CustomerProfile,
};
use sqlx::SqlitePool;
use std::sync::Arc;

const CUSTOMER_SELECT: &str = "SELECT id, name, phone, email, membership_number, is_active, created_at, updated_at FROM customer";

#[derive(Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
    staged: Arc<Mutex<Vec<Customer>>>,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            staged: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Customer>> {
        let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
        let row = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Mobile-number lookup with membership and preferences eagerly loaded.
    ///
    /// Soft not-found: returns `Ok(None)` when no customer matches.
    pub async fn find_by_mobile_number(&self, phone: &str) -> RepoResult<Option<CustomerProfile>> {
        let sql = format!("{CUSTOMER_SELECT} WHERE phone = ?");
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;
        let Some(customer) = customer else {
            return Ok(None);
        };

        let membership = sqlx::query_as::<_, CustomerMembership>(
            "SELECT id, customer_id, tier, discount_percentage, points, is_active, created_at, updated_at FROM customer_membership WHERE customer_id = ?",
        )
        .bind(customer.id)
        .fetch_optional(&self.pool)
        .await?;

        // rowid order = insertion order (upserts keep the original rowid)
        let preferences = sqlx::query_as::<_, CustomerPreference>(
            "SELECT customer_id, key, value, category, created_at, updated_at FROM customer_preference WHERE customer_id = ? ORDER BY rowid",
        )
        .bind(customer.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(CustomerProfile {
            customer,
            membership,
            preferences,
        }))
    }
}

impl StagedRepository<Customer, CustomerCreate> for CustomerRepository {
    fn add(&self, data: CustomerCreate) -> RepoResult<Customer> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation(
                "Customer name must not be empty".into(),
            ));
        }
        if data.phone.trim().is_empty() {
            return Err(RepoError::Validation(
                "Customer phone must not be empty".into(),
            ));
        }
        let now = shared::util::now_millis();
        let customer = Customer {
            id: shared::util::snowflake_id(),
            name: data.name,
            phone: data.phone,
            email: data.email,
            membership_number: data.membership_number,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.staged.lock().push(customer.clone());
        Ok(customer)
    }

    async fn save_changes(&self) -> RepoResult<usize> {
        let staged: Vec<Customer> = self.staged.lock().clone();
        if staged.is_empty() {
            return Ok(0);
        }
        let mut tx = self.pool.begin().await?;
        for c in &staged {
            sqlx::query(
                "INSERT INTO customer (id, name, phone, email, membership_number, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .bind(c.id)
            .bind(&c.name)
            .bind(&c.phone)
            .bind(&c.email)
            .bind(&c.membership_number)
            .bind(c.is_active)
            .bind(c.created_at)
            .bind(c.updated_at)
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
