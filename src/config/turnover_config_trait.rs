// ==========================================
// 员工离职管理 - 配置读取 Trait
// ==========================================
// 职责: 定义导入/驾驶舱所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::DateOrder;
use crate::engine::dashboard_aggregator::AggregationConfig;
use async_trait::async_trait;
use std::error::Error;

pub type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

// ==========================================
// TurnoverConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait TurnoverConfigReader: Send + Sync {
    // ===== 驾驶舱 =====

    /// 原因分布保留条目数
    ///
    /// # 默认值
    /// - 7
    async fn get_reason_top_n(&self) -> ConfigResult<usize>;

    /// 最近离职条目数
    ///
    /// # 默认值
    /// - 5
    async fn get_recent_exits_limit(&self) -> ConfigResult<usize>;

    /// 无年份过滤时的滚动窗口月数
    ///
    /// # 默认值
    /// - 6
    async fn get_rolling_window_months(&self) -> ConfigResult<u32>;

    /// 天 → 月折算天数
    ///
    /// # 默认值
    /// - 30
    async fn get_days_per_month(&self) -> ConfigResult<i64>;

    // ===== 导入 =====

    /// NN/NN/YYYY 日期的优先解读顺序
    ///
    /// # 默认值
    /// - DMY
    async fn get_date_order(&self) -> ConfigResult<DateOrder>;

    /// 一次读取全部驾驶舱参数
    async fn load_aggregation_config(&self) -> ConfigResult<AggregationConfig> {
        Ok(AggregationConfig {
            reason_top_n: self.get_reason_top_n().await?,
            recent_exits_limit: self.get_recent_exits_limit().await?,
            rolling_window_months: self.get_rolling_window_months().await?,
            days_per_month: self.get_days_per_month().await?,
        })
    }
}
