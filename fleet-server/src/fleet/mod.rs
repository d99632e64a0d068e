//! Fleet domain logic
//!
//! # 模块结构
//!
//! - [`provisioner`] - 座位图克隆与原子替换 (create / re-model)
//! - [`status`] - 车辆运营状态转换表
//!
//! Controllers call into this module for anything beyond plain CRUD:
//! bus creation, bus updates (including the diagram swap on a model
//! change) and status-transition queries.

pub mod provisioner;
pub mod status;

use crate::db::repository::RepoError;
use crate::utils::AppError;
use shared::models::BusStatus;
use thiserror::Error;

/// Fleet domain error types
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: BusStatus, to: BusStatus },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<FleetError> for AppError {
    fn from(err: FleetError) -> Self {
        match err {
            FleetError::NotFound(msg) => AppError::NotFound(msg),
            FleetError::InvalidTransition { from, to } => {
                AppError::BusinessRule(format!("Invalid status transition: {from} -> {to}"))
            }
            FleetError::Repo(repo) => repo.into(),
        }
    }
}

/// Result type for fleet domain operations
pub type FleetResult<T> = Result<T, FleetError>;
