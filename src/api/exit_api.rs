// ==========================================
// 员工离职管理 - 离职记录 API
// ==========================================
// 职责: 人工登记 / 编辑 / 删除 / 清空 / 查询
// 规则: 表单与导入行走同一条规范化 + 校验路径；tenure_days 始终由系统重新派生
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::TurnoverConfigReader;
use crate::domain::exit::{ExitForm, ExitRecord};
use crate::domain::import::ValidatedExit;
use crate::domain::types::ExitType;
use crate::i18n::t;
use crate::importer::{ExitValidator, FieldMapper, RecordValidator, RowNormalizer};
use crate::repository::{ExitQuery, ExitStore};

/// 清空结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearOutcome {
    pub deleted: usize,
    pub already_empty: bool,
    pub message: String,
}

// ==========================================
// ExitApi - 离职记录 API
// ==========================================
pub struct ExitApi {
    store: Arc<dyn ExitStore>,
    config: Arc<dyn TurnoverConfigReader>,
    validator: ExitValidator,
}

impl ExitApi {
    /// 创建新的ExitApi实例
    ///
    /// # 参数
    /// - store: 离职记录存储
    /// - config: 配置读取器（日期顺序）
    pub fn new(store: Arc<dyn ExitStore>, config: Arc<dyn TurnoverConfigReader>) -> Self {
        Self {
            store,
            config,
            validator: ExitValidator::new(),
        }
    }

    /// 表单 → 规范化 → 校验
    async fn validate_form(&self, form: &ExitForm) -> ApiResult<ValidatedExit> {
        let order = self
            .config
            .get_date_order()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        let draft = FieldMapper::new(order).normalize_form(form);
        self.validator.validate(draft).map_err(|rejection| {
            warn!(reasons = ?rejection.reasons, "表单校验失败");
            ApiError::ValidationRejected(rejection)
        })
    }

    /// 人工登记一条离职记录
    ///
    /// # 返回
    /// - Ok(String): 新记录 id
    /// - Err(ApiError::ValidationRejected): 校验失败（携带全部原因）
    #[instrument(skip(self, form), fields(exit_type = %form.exit_type))]
    pub async fn register_exit(&self, form: ExitForm) -> ApiResult<String> {
        let validated = self.validate_form(&form).await?;
        let id = self.store.add_one(validated.data).await?;
        info!(id = %id, "{}", t("exit.registered"));
        Ok(id)
    }

    /// 编辑离职记录（整体替换可变字段，保留 id / created_at）
    #[instrument(skip(self, form))]
    pub async fn update_exit(&self, id: &str, form: ExitForm) -> ApiResult<ExitRecord> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidInput("记录ID不能为空".to_string()));
        }

        let validated = self.validate_form(&form).await?;
        let record = self.store.replace_one(id, validated.data).await?;
        info!(id = %id, "{}", t("exit.updated"));
        Ok(record)
    }

    /// 删除单条离职记录
    #[instrument(skip(self))]
    pub async fn delete_exit(&self, id: &str) -> ApiResult<()> {
        if self.store.delete_one(id).await? {
            info!(id = %id, "{}", t("exit.deleted"));
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("ExitRecord(id={})不存在", id)))
        }
    }

    /// 清空全部离职记录
    #[instrument(skip(self))]
    pub async fn clear_all(&self) -> ApiResult<ClearOutcome> {
        let deleted = self.store.delete_all().await?;
        let already_empty = deleted == 0;
        let message = if already_empty {
            t("clear.already_empty")
        } else {
            t("clear.success")
        };
        info!(deleted, "离职记录已清空");

        Ok(ClearOutcome {
            deleted,
            already_empty,
            message,
        })
    }

    /// 查询单条离职记录
    pub async fn get_exit(&self, id: &str) -> ApiResult<ExitRecord> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("ExitRecord(id={})不存在", id)))
    }

    /// 列出离职记录（按离职日期降序，可按类型过滤）
    pub async fn list_exits(&self, exit_type: Option<ExitType>) -> ApiResult<Vec<ExitRecord>> {
        let query = match exit_type {
            Some(kind) => ExitQuery::of_type(kind),
            None => ExitQuery::all(),
        };
        Ok(self.store.query(query).await?)
    }
}
