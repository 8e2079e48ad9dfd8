// ==========================================
// 员工离职管理 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供离职记录存取接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod exit_store;
pub mod exit_store_impl;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use exit_store::{ExitOrder, ExitQuery, ExitStore};
pub use exit_store_impl::SqliteExitStore;
