// ==========================================
// 员工离职管理 - 配置层
// ==========================================
// 职责: 系统配置管理（缺失项回退默认值）
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod turnover_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, defaults, ConfigManager};
pub use turnover_config_trait::{ConfigResult, TurnoverConfigReader};
