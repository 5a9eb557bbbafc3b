use loyalty_server::{AppState, Config, SystemIntegrationService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    loyalty_server::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!("Loyalty server starting...");

    // 2. 初始化应用状态
    let state = AppState::initialize(&config).await?;

    // 3. 运行系统集成验证
    let service = SystemIntegrationService::new(state);

    let integration = service.validate_system_integration().await;
    println!("{}", serde_json::to_string_pretty(&integration)?);

    let health = service.perform_system_health_check().await;
    println!("{}", serde_json::to_string_pretty(&health)?);

    let compatibility = service.validate_cross_platform_compatibility();
    println!("{}", serde_json::to_string_pretty(&compatibility)?);

    if !integration.success || !health.healthy || !compatibility.compatible {
        tracing::error!("System validation failed");
        std::process::exit(1);
    }

    tracing::info!("System validation passed");
    Ok(())
}
