//! Membership Repository

use super::{RepoError, RepoResult, StagedRepository};
use parking_lot::Mutex;
use shared::models::{CustomerMembership, MembershipCreate};
use sqlx::SqlitePool;
use std::sync::Arc;

const MEMBERSHIP_SELECT: &str = "SELECT id, customer_id, tier, discount_percentage, points, is_active, created_at, updated_at FROM customer_membership";

#[derive(Clone)]
pub struct MembershipRepository {
    pool: SqlitePool,
    staged: Arc<Mutex<Vec<CustomerMembership>>>,
}

impl MembershipRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            staged: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// One-to-one lookup by owning customer
    pub async fn find_by_customer_id(
        &self,
        customer_id: i64,
    ) -> RepoResult<Option<CustomerMembership>> {
        let sql = format!("{MEMBERSHIP_SELECT} WHERE customer_id = ?");
        let row = sqlx::query_as::<_, CustomerMembership>(&sql)
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

impl StagedRepository<CustomerMembership, MembershipCreate> for MembershipRepository {
    fn add(&self, data: MembershipCreate) -> RepoResult<CustomerMembership> {
        if data.discount_percentage < 0.0 {
            return Err(RepoError::Validation(
                "Discount percentage must be non-negative".into(),
            ));
        }
        if data.points < 0 {
            return Err(RepoError::Validation("Points must be non-negative".into()));
        }
        let now = shared::util::now_millis();
        let membership = CustomerMembership {
            id: shared::util::snowflake_id(),
            customer_id: data.customer_id,
            tier: data.tier,
            discount_percentage: data.discount_percentage,
            points: data.points,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.staged.lock().push(membership.clone());
        Ok(membership)
    }

    async fn save_changes(&self) -> RepoResult<usize> {
        let staged: Vec<CustomerMembership> = self.staged.lock().clone();
        if staged.is_empty() {
            return Ok(0);
        }
        let mut tx = self.pool.begin().await?;
        for m in &staged {
            sqlx::query(
                "INSERT INTO customer_membership (id, customer_id, tier, discount_percentage, points, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .bind(m.id)
            .bind(m.customer_id)
            .bind(m.tier)
            .bind(m.discount_percentage)
            .bind(m.points)
            .bind(m.is_active)
            .bind(m.created_at)
            .bind(m.updated_at)
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
