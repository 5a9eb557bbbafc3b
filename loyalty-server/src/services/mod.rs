//! 服务层 - 系统集成验证服务
//!
//! # 服务列表
//!
//! - [`SystemIntegrationService`] - 跨组件集成验证、业务创建工作流、
//!   健康检查、跨平台兼容性检查

pub mod integration;

pub use integration::SystemIntegrationService;
