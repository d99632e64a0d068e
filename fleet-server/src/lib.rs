//! Fleet Server - 车队与座位图管理服务
//!
//! # 架构概述
//!
//! - **车队域** (`fleet`): 座位图置换器 (模板克隆) 与车辆状态机
//! - **数据库** (`db`): SQLite 连接池、迁移与仓储函数
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! fleet-server/src/
//! ├── core/          # 配置、状态、服务器启动
//! ├── fleet/         # 座位图置换器、状态机
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (连接 + 仓储)
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod fleet;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
