// ==========================================
// 员工离职管理 - 离职洞察 API
// ==========================================
// 职责: 查询主动离职记录 → 投影 → 调用外部摘要服务
// ==========================================

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::ExitType;
use crate::insights::{ExitSummarizer, VoluntaryExitDigest};
use crate::repository::{ExitQuery, ExitStore};

pub struct InsightsApi {
    store: Arc<dyn ExitStore>,
    summarizer: Arc<dyn ExitSummarizer>,
}

impl InsightsApi {
    pub fn new(store: Arc<dyn ExitStore>, summarizer: Arc<dyn ExitSummarizer>) -> Self {
        Self { store, summarizer }
    }

    /// 生成离职洞察文本
    ///
    /// # 返回
    /// - Err(ApiError::NoVoluntaryData): 没有主动离职记录（不调用摘要服务）
    /// - Err(ApiError::Summarizer): 摘要服务失败
    #[instrument(skip(self))]
    pub async fn generate_insights(&self) -> ApiResult<String> {
        let records = self
            .store
            .query(ExitQuery::of_type(ExitType::Voluntary))
            .await?;

        let digests: Vec<VoluntaryExitDigest> = records
            .iter()
            .filter_map(VoluntaryExitDigest::from_record)
            .collect();
        if digests.is_empty() {
            return Err(ApiError::NoVoluntaryData);
        }

        info!(count = digests.len(), "调用摘要服务");
        let insights = self.summarizer.summarize(&digests).await.map_err(|e| {
            error!(error = %e, "摘要服务失败");
            ApiError::from(e)
        })?;
        Ok(insights)
    }
}
