use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// 服务器状态 - axum handler 共享的应用状态
///
/// 克隆成本低：`Config` 是小结构体，`SqlitePool` 内部是 Arc。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// 初始化服务器状态
    ///
    /// 确保工作目录存在，打开数据库并运行迁移。
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        if let Some(parent) = std::path::Path::new(&config.db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;
        }

        let db_service = DbService::new(&config.db_path).await?;
        Ok(Self::new(config.clone(), db_service.pool))
    }
}
