//! Membership Benefit Repository

use super::{RepoError, RepoResult, StagedRepository};
use parking_lot::Mutex;
use shared::models::{BenefitCreate, MembershipBenefit};
use sqlx::SqlitePool;
use std::sync::Arc;

const BENEFIT_SELECT: &str = "SELECT id, membership_id, name, description, benefit_type, value, is_active, created_at, updated_at FROM membership_benefit";

#[derive(Clone)]
pub struct BenefitRepository {
    pool: SqlitePool,
    staged: Arc<Mutex<Vec<MembershipBenefit>>>,
}

impl BenefitRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            staged: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All benefits of a membership (empty when none match)
    pub async fn find_by_membership_id(
        &self,
        membership_id: i64,
    ) -> RepoResult<Vec<MembershipBenefit>> {
        let sql = format!("{BENEFIT_SELECT} WHERE membership_id = ? ORDER BY created_at");
        let rows = sqlx::query_as::<_, MembershipBenefit>(&sql)
            .bind(membership_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

impl StagedRepository<MembershipBenefit, BenefitCreate> for BenefitRepository {
    fn add(&self, data: BenefitCreate) -> RepoResult<MembershipBenefit> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation(
                "Benefit name must not be empty".into(),
            ));
        }
        let now = shared::util::now_millis();
        let benefit = MembershipBenefit {
            id: shared::util::snowflake_id(),
            membership_id: data.membership_id,
            name: data.name,
            description: data.description,
            benefit_type: data.benefit_type,
            value: data.value,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.staged.lock().push(benefit.clone());
        Ok(benefit)
    }

    async fn save_changes(&self) -> RepoResult<usize> {
        let staged: Vec<MembershipBenefit> = self.staged.lock().clone();
        if staged.is_empty() {
            return Ok(0);
        }
        let mut tx = self.pool.begin().await?;
        for b in &staged {
            sqlx::query(
                "INSERT INTO membership_benefit (id, membership_id, name, description, benefit_type, value, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .bind(b.id)
            .bind(b.membership_id)
            .bind(&b.name)
            .bind(&b.description)
            .bind(b.benefit_type)
            .bind(b.value)
            .bind(b.is_active)
            .bind(b.created_at)
            .bind(b.updated_at)
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
