use std::sync::Arc;

use crate::core::Config;
use crate::db::repository::{
    BenefitRepository, CustomerRepository, MembershipRepository, PreferenceRepository,
};
use crate::db::DbService;
use crate::utils::AppError;

/// 应用状态 - 持有所有组件的单例引用
///
/// AppState 是服务的组合根：组件"解析"即状态构造。所有仓储共享同一个
/// SQLite 连接池，构成一个工作单元范围。使用 Arc 实现浅拷贝。
///
/// # 组件
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SQLite 连接池 |
/// | customers | 顾客仓储 |
/// | memberships | 会员仓储 |
/// | benefits | 权益仓储 |
/// | preferences | 偏好仓储 |
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    db: DbService,
    customers: CustomerRepository,
    memberships: MembershipRepository,
    benefits: BenefitRepository,
    preferences: PreferenceRepository,
}

impl AppState {
    /// Initialize all components over one database service
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        let pool = db.pool.clone();

        tracing::info!(
            environment = %config.environment,
            "Application state initialized"
        );

        Ok(Self {
            config: Arc::new(config.clone()),
            customers: CustomerRepository::new(pool.clone()),
            memberships: MembershipRepository::new(pool.clone()),
            benefits: BenefitRepository::new(pool.clone()),
            preferences: PreferenceRepository::new(pool),
            db,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.db.pool
    }

    pub fn customers(&self) -> &CustomerRepository {
        &self.customers
    }

    pub fn memberships(&self) -> &MembershipRepository {
        &self.memberships
    }

    pub fn benefits(&self) -> &BenefitRepository {
        &self.benefits
    }

    pub fn preferences(&self) -> &PreferenceRepository {
        &self.preferences
    }
}
