use fleet_server::{Config, Server, ServerState};
use fleet_server::utils::logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载 .env 并初始化日志
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    logger::init_logger_with_file(None, config.log_dir.as_deref());

    tracing::info!(
        "Fleet server starting (env: {}, db: {})",
        config.environment,
        config.db_path
    );

    // 2. 初始化服务器状态 (数据库 + 迁移)
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
