// ==========================================
// 员工离职管理 - 引擎层
// ==========================================
// 职责: 记录过滤与驾驶舱指标聚合（纯计算）
// 红线: Engine 不拼 SQL, 不访问存储
// ==========================================

pub mod dashboard_aggregator;
pub mod filter;

// 重导出核心引擎
pub use dashboard_aggregator::{AggregationConfig, DashboardAggregator};
pub use filter::{ExitFilter, FilterEngine, FilterInputError};
