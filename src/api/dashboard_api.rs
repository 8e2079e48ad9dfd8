// ==========================================
// 员工离职管理 - 驾驶舱 API
// ==========================================
// 职责: 读取全部记录 → 年/月过滤 → 聚合驾驶舱指标；月度下钻列表
// 架构: API 层 → Repository (ExitStore) + Engine (FilterEngine / DashboardAggregator)
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::config::TurnoverConfigReader;
use crate::domain::dashboard::{AggregationResult, MonthlyExitView};
use crate::engine::{DashboardAggregator, ExitFilter, FilterEngine};
use crate::repository::{ExitQuery, ExitStore};

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================
pub struct DashboardApi {
    store: Arc<dyn ExitStore>,
    config: Arc<dyn TurnoverConfigReader>,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 参数
    /// - store: 离职记录存储
    /// - config: 驾驶舱参数读取器
    pub fn new(store: Arc<dyn ExitStore>, config: Arc<dyn TurnoverConfigReader>) -> Self {
        Self { store, config }
    }

    /// 驾驶舱数据（以今天为参考日期）
    ///
    /// # 参数
    /// - year: 年份过滤（可选）
    /// - month: 从 0 开始的月份过滤（可选）
    pub async fn get_dashboard_data(
        &self,
        year: Option<i64>,
        month: Option<i64>,
    ) -> ApiResult<AggregationResult> {
        let today = chrono::Local::now().date_naive();
        self.get_dashboard_data_at(year, month, today).await
    }

    /// 驾驶舱数据（指定参考日期，滚动窗口以此结束）
    #[instrument(skip(self))]
    pub async fn get_dashboard_data_at(
        &self,
        year: Option<i64>,
        month: Option<i64>,
        today: NaiveDate,
    ) -> ApiResult<AggregationResult> {
        // 参数先校验，非法输入不触发查询
        let filter = ExitFilter::new(year, month)?;

        let records = self.store.query(ExitQuery::all()).await?;
        let filtered = FilterEngine::apply(records, &filter);
        debug!(matched = filtered.len(), "过滤完成");

        let aggregator = self.aggregator().await?;
        Ok(aggregator.aggregate(&filtered, filter.year, today))
    }

    /// 月度下钻: 指定月份的离职列表（按离职日期降序）
    ///
    /// # 参数
    /// - year: 年份（可选，缺省匹配任意年份）
    /// - month: 从 0 开始的月份（必填）
    #[instrument(skip(self))]
    pub async fn list_exits_in_month(
        &self,
        year: Option<i64>,
        month: i64,
    ) -> ApiResult<Vec<MonthlyExitView>> {
        let filter = ExitFilter::new(year, Some(month))?;

        let records = self.store.query(ExitQuery::all()).await?;
        let filtered = FilterEngine::apply(records, &filter);

        let aggregator = self.aggregator().await?;
        Ok(aggregator.month_listing(&filtered))
    }

    async fn aggregator(&self) -> ApiResult<DashboardAggregator> {
        let config = self
            .config
            .load_aggregation_config()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        Ok(DashboardAggregator::new(config))
    }
}
