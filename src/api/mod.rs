// ==========================================
// 员工离职管理 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行/展示层调用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod exit_api;
pub mod import_api;
pub mod insights_api;

// 重导出核心类型
pub use dashboard_api::DashboardApi;
pub use error::{ApiError, ApiResult};
pub use exit_api::{ClearOutcome, ExitApi};
pub use import_api::ImportApi;
pub use insights_api::InsightsApi;
