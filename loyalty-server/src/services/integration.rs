//! System Integration Service
//!
//! Validation façade over the repository layer: cross-component
//! integration validation, the scripted business creation workflow, a
//! per-component health check and cross-platform compatibility checks.
//! Expected failures are reported through the result objects in
//! `shared::reports`, never as errors.

use std::collections::BTreeMap;
use std::time::Instant;

use shared::models::{
    BenefitCreate, BenefitType, BusinessCreationRequest, CustomerCreate, MembershipCreate,
    MembershipTier,
};
use shared::reports::{
    CompatibilityReport, ComponentCheck, HealthReport, IntegrationReport, WorkflowReport,
};
use sqlx::SqlitePool;

use crate::core::AppState;
use crate::db::repository::{provisioning, RepoError, RepoResult, StagedRepository};

/// Platforms the service is validated against
const SUPPORTED_PLATFORMS: [&str; 5] = ["linux", "macos", "windows", "android", "ios"];

pub struct SystemIntegrationService {
    state: AppState,
}

impl SystemIntegrationService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Resolve every component and confirm each participates in a
    /// cross-component operation (probe customer -> membership ->
    /// benefit -> preference -> eager read-back). Probe rows are
    /// removed afterwards.
    pub async fn validate_system_integration(&self) -> IntegrationReport {
        let mut report = IntegrationReport::default();
        let probe_phone = format!("probe-{}", shared::util::snowflake_id());

        match sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(self.state.pool())
            .await
        {
            Ok(_) => report.validated_components.push("database".into()),
            Err(e) => report.failed_components.push(format!("database: {e}")),
        }

        let customer_id = match self.probe_customer(&probe_phone).await {
            Ok(id) => {
                report.validated_components.push("customer_repository".into());
                Some(id)
            }
            Err(e) => {
                report
                    .failed_components
                    .push(format!("customer_repository: {e}"));
                None
            }
        };

        let membership_id = match customer_id {
            Some(cid) => match self.probe_membership(cid).await {
                Ok(id) => {
                    report
                        .validated_components
                        .push("membership_repository".into());
                    Some(id)
                }
                Err(e) => {
                    report
                        .failed_components
                        .push(format!("membership_repository: {e}"));
                    None
                }
            },
            None => {
                report
                    .failed_components
                    .push("membership_repository: skipped, prerequisite failed".into());
                None
            }
        };

        match membership_id {
            Some(mid) => match self.probe_benefit(mid).await {
                Ok(()) => report.validated_components.push("benefit_repository".into()),
                Err(e) => report
                    .failed_components
                    .push(format!("benefit_repository: {e}")),
            },
            None => report
                .failed_components
                .push("benefit_repository: skipped, prerequisite failed".into()),
        }

        match customer_id {
            Some(cid) => match self.probe_preference(cid).await {
                Ok(()) => report
                    .validated_components
                    .push("preference_repository".into()),
                Err(e) => report
                    .failed_components
                    .push(format!("preference_repository: {e}")),
            },
            None => report
                .failed_components
                .push("preference_repository: skipped, prerequisite failed".into()),
        }

        // The eager join is the cross-component read everything above
        // participated in
        if customer_id.is_some() {
            match self.probe_profile_join(&probe_phone).await {
                Ok(()) => report.validated_components.push("customer_profile".into()),
                Err(e) => report
                    .failed_components
                    .push(format!("customer_profile: {e}")),
            }
        } else {
            report
                .failed_components
                .push("customer_profile: skipped, prerequisite failed".into());
        }

        self.cleanup_probe(customer_id, membership_id).await;

        report.success = report.failed_components.is_empty();
        if !report.success {
            tracing::warn!(
                failed = report.failed_components.len(),
                "System integration validation failed"
            );
        }
        report
    }

    async fn probe_customer(&self, phone: &str) -> RepoResult<i64> {
        let customers = self.state.customers();
        let customer = customers.add(CustomerCreate {
            name: "Integration Probe".into(),
            phone: phone.to_string(),
            email: None,
            membership_number: None,
        })?;
        customers.save_changes().await?;
        customers
            .find_by_id(customer.id)
            .await?
            .ok_or_else(|| RepoError::NotFound("probe customer not readable after save".into()))?;
        Ok(customer.id)
    }

    async fn probe_membership(&self, customer_id: i64) -> RepoResult<i64> {
        let memberships = self.state.memberships();
        memberships.add(MembershipCreate {
            customer_id,
            tier: MembershipTier::Bronze,
            discount_percentage: 0.0,
            points: 0,
        })?;
        memberships.save_changes().await?;
        let membership = memberships
            .find_by_customer_id(customer_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("probe membership not readable after save".into()))?;
        Ok(membership.id)
    }

    async fn probe_benefit(&self, membership_id: i64) -> RepoResult<()> {
        let benefits = self.state.benefits();
        benefits.add(BenefitCreate {
            membership_id,
            name: "Probe Benefit".into(),
            description: None,
            benefit_type: BenefitType::PercentageDiscount,
            value: 0.0,
        })?;
        benefits.save_changes().await?;
        let rows = benefits.find_by_membership_id(membership_id).await?;
        if rows.is_empty() {
            return Err(RepoError::NotFound(
                "probe benefit not readable after save".into(),
            ));
        }
        Ok(())
    }

    async fn probe_preference(&self, customer_id: i64) -> RepoResult<()> {
        let preferences = self.state.preferences();
        preferences
            .set_preference(customer_id, "probe", "ok", "system")
            .await?;
        let dict = preferences.preferences_dictionary(customer_id).await?;
        if dict.get("probe").map(String::as_str) != Some("ok") {
            return Err(RepoError::NotFound(
                "probe preference missing from dictionary".into(),
            ));
        }
        Ok(())
    }

    async fn probe_profile_join(&self, phone: &str) -> RepoResult<()> {
        let profile = self
            .state
            .customers()
            .find_by_mobile_number(phone)
            .await?
            .ok_or_else(|| RepoError::NotFound("probe profile not found by phone".into()))?;
        if profile.membership.is_none() {
            return Err(RepoError::NotFound(
                "probe profile missing membership".into(),
            ));
        }
        if profile.preferences.is_empty() {
            return Err(RepoError::NotFound(
                "probe profile missing preferences".into(),
            ));
        }
        Ok(())
    }

    async fn cleanup_probe(&self, customer_id: Option<i64>, membership_id: Option<i64>) {
        let pool = self.state.pool();
        if let Some(mid) = membership_id {
            Self::try_delete(pool, "DELETE FROM membership_benefit WHERE membership_id = ?", mid)
                .await;
            Self::try_delete(pool, "DELETE FROM customer_membership WHERE id = ?", mid).await;
        }
        if let Some(cid) = customer_id {
            Self::try_delete(pool, "DELETE FROM customer_preference WHERE customer_id = ?", cid)
                .await;
            Self::try_delete(pool, "DELETE FROM customer WHERE id = ?", cid).await;
        }
    }

    async fn try_delete(pool: &SqlitePool, sql: &str, id: i64) {
        if let Err(e) = sqlx::query(sql).bind(id).execute(pool).await {
            tracing::warn!(error = %e, "Probe cleanup failed");
        }
    }

    /// Run the scripted business creation workflow: owner user ->
    /// business -> N shops. Strictly ordered, no retry, no rollback;
    /// the first failing step aborts the remainder and earlier side
    /// effects stay committed.
    pub async fn test_business_creation_workflow(
        &self,
        request: &BusinessCreationRequest,
    ) -> WorkflowReport {
        let mut report = WorkflowReport::default();

        if request.business_name.trim().is_empty() {
            report.errors.push("Business name must not be empty".into());
        }
        if request.owner_username.trim().is_empty() {
            report
                .errors
                .push("Owner username must not be empty".into());
        }
        if !report.errors.is_empty() {
            return report;
        }

        let pool = self.state.pool();

        let owner = match provisioning::create_user(pool, &request.owner_username).await {
            Ok(user) => {
                report.completed_steps.push("Creating owner user".into());
                user
            }
            Err(e) => {
                report.errors.push(format!(
                    "Failed to create owner user '{}': {e}",
                    request.owner_username
                ));
                return report;
            }
        };

        let business = match provisioning::create_business(
            pool,
            &request.business_name,
            &request.business_type,
            owner.id,
        )
        .await
        {
            Ok(b) => {
                report.completed_steps.push("Creating business".into());
                b
            }
            Err(e) => {
                report.errors.push(format!(
                    "Failed to create business '{}': {e}",
                    request.business_name
                ));
                return report;
            }
        };
        // Committed at this point regardless of later failures
        report.business_id = Some(business.id);

        for i in 0..request.number_of_shops {
            let shop_name = format!("{} - Shop {}", request.business_name, i + 1);
            match provisioning::create_shop(
                pool,
                business.id,
                &shop_name,
                request.shop_attributes.as_ref(),
            )
            .await
            {
                Ok(shop) => report.shop_ids.push(shop.id),
                Err(e) => {
                    report
                        .errors
                        .push(format!("Failed to create shop {}: {e}", i + 1));
                    return report;
                }
            }
        }
        report
            .completed_steps
            .push(format!("Creating {} shops", request.number_of_shops));

        report.success = true;
        tracing::info!(
            business_id = business.id,
            shops = report.shop_ids.len(),
            "Business creation workflow completed"
        );
        report
    }

    /// Probe every component for liveness; overall health is the
    /// conjunction of component healths.
    pub async fn perform_system_health_check(&self) -> HealthReport {
        let pool = self.state.pool();
        let mut components = BTreeMap::new();

        let db_start = Instant::now();
        let db_check = match sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(pool).await {
            Ok(_) => ComponentCheck::ok_with_latency(db_start.elapsed().as_millis() as u64),
            Err(e) => ComponentCheck::error(format!("Database error: {e}")),
        };
        components.insert("database".to_string(), db_check);

        for (component, table) in [
            ("customers", "customer"),
            ("memberships", "customer_membership"),
            ("benefits", "membership_benefit"),
            ("preferences", "customer_preference"),
        ] {
            components.insert(component.to_string(), Self::check_table(pool, table).await);
        }

        let healthy = components.values().all(|c| c.healthy);
        HealthReport {
            healthy,
            components,
        }
    }

    async fn check_table(pool: &SqlitePool, table: &str) -> ComponentCheck {
        let start = Instant::now();
        let sql = format!("SELECT COUNT(*) FROM {table}");
        match sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await {
            Ok(_) => ComponentCheck::ok_with_latency(start.elapsed().as_millis() as u64),
            Err(e) => ComponentCheck::error(format!("{table}: {e}")),
        }
    }

    /// Collect per-platform issues for the configured deployment;
    /// compatible iff every platform's issue list is empty.
    pub fn validate_cross_platform_compatibility(&self) -> CompatibilityReport {
        let database_path = &self.state.config().database_path;
        let mut issues = BTreeMap::new();
        for platform in SUPPORTED_PLATFORMS {
            issues.insert(
                platform.to_string(),
                platform_issues(platform, database_path),
            );
        }
        let compatible = issues.values().all(|list| list.is_empty());
        CompatibilityReport {
            compatible,
            supported_platforms: SUPPORTED_PLATFORMS.iter().map(|p| p.to_string()).collect(),
            issues,
        }
    }
}

/// Deterministic per-platform checks against the configured database path
fn platform_issues(platform: &str, database_path: &str) -> Vec<String> {
    let mut issues = Vec::new();
    // The in-memory backend is portable everywhere
    if database_path == crate::db::IN_MEMORY {
        return issues;
    }
    match platform {
        "windows" => {
            if database_path
                .chars()
                .any(|c| matches!(c, '<' | '>' | '"' | '|' | '?' | '*'))
            {
                issues.push(format!(
                    "Database path '{database_path}' contains characters invalid on Windows"
                ));
            }
            if database_path.len() > 240 {
                issues.push("Database path exceeds the Windows path length limit".into());
            }
        }
        "linux" | "macos" => {
            if database_path.contains('\\') {
                issues.push(format!(
                    "Database path '{database_path}' uses backslash separators"
                ));
            }
        }
        "android" | "ios" => {
            if database_path.starts_with('/') {
                issues.push(format!(
                    "Absolute database path '{database_path}' is not portable to app-scoped storage on {platform}"
                ));
            }
        }
        _ => {}
    }
    issues
}
