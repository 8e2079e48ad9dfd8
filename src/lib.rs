// ==========================================
// 员工离职管理 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 离职记录导入 + 流失率驾驶舱
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 过滤与聚合
pub mod engine;

// 导入层 - 外部表格
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 离职洞察输入
pub mod insights;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DateOrder, ExitType};

// 领域实体
pub use domain::{AggregationResult, ExitData, ExitForm, ExitRecord, ImportReport};

// 引擎
pub use engine::{DashboardAggregator, ExitFilter, FilterEngine};

// API
pub use api::{DashboardApi, ExitApi, ImportApi, InsightsApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
