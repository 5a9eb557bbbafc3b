//! Loyalty Server - POS 顾客忠诚度与业务预配服务
//!
//! # 架构概述
//!
//! 本模块提供以下核心功能：
//!
//! - **数据库** (`db`): SQLite 持久层与分实体仓储 (stage-then-commit)
//! - **集成服务** (`services`): 跨组件验证、业务创建工作流、健康检查
//! - **组合根** (`core`): 配置与应用状态
//!
//! # 模块结构
//!
//! ```text
//! loyalty-server/src/
//! ├── core/          # 配置、状态
//! ├── services/      # 系统集成验证服务
//! ├── db/            # 数据库层与仓储
//! └── utils/         # 错误、日志
//! ```

pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{AppState, Config};
pub use db::repository::{
    BenefitRepository, CustomerRepository, MembershipRepository, PreferenceRepository, RepoError,
    RepoResult, StagedRepository,
};
pub use db::DbService;
pub use services::SystemIntegrationService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
