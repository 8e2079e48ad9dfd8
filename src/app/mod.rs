// ==========================================
// 员工离职管理 - 应用层
// ==========================================
// 职责: 组装存储、配置与 API，供入口程序使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
