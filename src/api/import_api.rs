// ==========================================
// 员工离职管理 - 导入 API
// ==========================================
// 职责: 读取导入配置（日期顺序），构建导入器并执行文件导入
// ==========================================

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::config::TurnoverConfigReader;
use crate::domain::import::ImportReport;
use crate::importer::{ExitImporter, ExitImporterImpl, ImportError};
use crate::repository::ExitStore;

/// 导入API
pub struct ImportApi {
    store: Arc<dyn ExitStore>,
    config: Arc<dyn TurnoverConfigReader>,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(store: Arc<dyn ExitStore>, config: Arc<dyn TurnoverConfigReader>) -> Self {
        Self { store, config }
    }

    async fn create_importer(&self) -> ApiResult<ExitImporterImpl> {
        let order = self
            .config
            .get_date_order()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        Ok(ExitImporterImpl::with_defaults(self.store.clone(), order))
    }

    /// 导入离职记录文件（.xlsx / .xls / .csv）
    ///
    /// # 返回
    /// - Ok(ImportReport): 导入条数、被拒绝行、提示与摘要
    /// - Err(ApiError::Import(NoValidRows)): 没有可用行
    /// - Err(ApiError::Import(Commit)): 存储整体失败
    #[instrument(skip(self))]
    pub async fn import_exits(&self, file_path: &str) -> ApiResult<ImportReport> {
        if file_path.trim().is_empty() {
            return Err(ApiError::InvalidInput("文件路径不能为空".to_string()));
        }
        let path = Path::new(file_path);
        if !path.exists() {
            return Err(ImportError::FileNotFound(file_path.to_string()).into());
        }

        let started = Instant::now();
        let importer = self.create_importer().await?;
        let report = importer.import_file(path).await?;

        info!(
            batch_id = %report.batch_id,
            imported = report.imported,
            rejected = report.rejected.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "文件导入完成"
        );
        Ok(report)
    }
}
