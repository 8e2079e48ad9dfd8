// ==========================================
// 员工离职管理 - 离职记录导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到存储
// 流程: 解析 → 规范化 → 校验（逐行，互不影响）→ 整批落库
// 结果区分:
//   - NoValidRows: 校验阶段没有可用行（重试同一输入无意义）
//   - Commit: 校验通过但存储整体拒绝（可重试）
// ==========================================

use crate::domain::import::{BatchValidation, ImportReport, RawRow, ValidationRejection};
use crate::domain::types::DateOrder;
use crate::i18n::t_with_args;
use crate::importer::error::{ImportCommitError, ImportError, ImportResult};
use crate::importer::exit_importer_trait::{
    ExitImporter, FileParser, RecordValidator, RowNormalizer,
};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::record_validator::ExitValidator;
use crate::repository::exit_store::ExitStore;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 导入摘要中展示的拒绝原因条数上限
const MAX_REASONS_IN_MESSAGE: usize = 5;

// ==========================================
// ExitImporterImpl - 离职记录导入器实现
// ==========================================
pub struct ExitImporterImpl {
    // 数据访问层
    store: Arc<dyn ExitStore>,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    normalizer: Box<dyn RowNormalizer>,
    validator: Box<dyn RecordValidator>,
}

impl ExitImporterImpl {
    /// 创建新的 ExitImporter 实例
    ///
    /// # 参数
    /// - store: 离职记录存储
    /// - file_parser: 文件解析器
    /// - normalizer: 行规范化器
    /// - validator: 记录校验器
    pub fn new(
        store: Arc<dyn ExitStore>,
        file_parser: Box<dyn FileParser>,
        normalizer: Box<dyn RowNormalizer>,
        validator: Box<dyn RecordValidator>,
    ) -> Self {
        Self {
            store,
            file_parser,
            normalizer,
            validator,
        }
    }

    /// 使用默认组件（按扩展名解析 + 别名表映射 + 标准校验）
    pub fn with_defaults(store: Arc<dyn ExitStore>, date_order: DateOrder) -> Self {
        Self::new(
            store,
            Box::new(UniversalFileParser),
            Box::new(FieldMapper::new(date_order)),
            Box::new(ExitValidator::new()),
        )
    }

    /// 逐行规范化 + 校验（不落库）
    ///
    /// 单行失败只记录到 rejected，不影响后续行
    pub fn process_rows(&self, rows: &[RawRow]) -> BatchValidation {
        let mut batch = BatchValidation::default();

        for row in rows {
            let draft = self.normalizer.normalize_row(row);
            match self.validator.validate(draft) {
                Ok(validated) => {
                    batch.warnings.extend(validated.warnings);
                    batch.accepted.push(validated.data);
                }
                Err(rejection) => {
                    warn!(
                        sheet = ?rejection.origin.sheet,
                        row = rejection.origin.row_number,
                        reasons = ?rejection.reasons,
                        "行被拒绝"
                    );
                    batch.rejected.push(rejection);
                }
            }
        }

        debug!(
            accepted = batch.accepted.len(),
            rejected = batch.rejected.len(),
            warnings = batch.warnings.len(),
            "批次校验完成"
        );
        batch
    }
}

/// 导入摘要: "N 条已导入" 或 "N 条已导入，M 条被拒绝: 原因..."
pub fn summary_message(imported: usize, rejected: &[ValidationRejection]) -> String {
    if rejected.is_empty() {
        return t_with_args("import.success", &[("imported", &imported.to_string())]);
    }

    let mut reasons: Vec<String> = rejected
        .iter()
        .take(MAX_REASONS_IN_MESSAGE)
        .map(|r| r.to_string())
        .collect();
    if rejected.len() > MAX_REASONS_IN_MESSAGE {
        reasons.push("...".to_string());
    }

    t_with_args(
        "import.partial",
        &[
            ("imported", &imported.to_string()),
            ("rejected", &rejected.len().to_string()),
            ("reasons", &reasons.join("; ")),
        ],
    )
}

#[async_trait]
impl ExitImporter for ExitImporterImpl {
    #[instrument(skip(self, file_path), fields(path = %file_path.display()))]
    async fn import_file(&self, file_path: &Path) -> ImportResult<ImportReport> {
        info!("开始导入离职记录文件");
        let rows = self.file_parser.parse_rows(file_path).map_err(|e| {
            error!(error = %e, "文件解析失败");
            e
        })?;
        info!(total_rows = rows.len(), "文件解析完成");

        self.import_rows(rows).await
    }

    async fn import_rows(&self, rows: Vec<RawRow>) -> ImportResult<ImportReport> {
        let batch_id = Uuid::new_v4().to_string();
        let BatchValidation {
            accepted,
            rejected,
            warnings,
        } = self.process_rows(&rows);

        if accepted.is_empty() {
            warn!(batch_id = %batch_id, rejected = rejected.len(), "没有可导入的有效记录");
            return Err(ImportError::NoValidRows { rejected });
        }

        let attempted = accepted.len();
        let ids = match self.store.batch_write(accepted).await {
            Ok(ids) => ids,
            Err(source) => {
                error!(batch_id = %batch_id, attempted, error = %source, "批次落库失败");
                return Err(ImportCommitError {
                    attempted,
                    rejected,
                    source,
                }
                .into());
            }
        };

        let message = summary_message(ids.len(), &rejected);
        info!(
            batch_id = %batch_id,
            imported = ids.len(),
            rejected = rejected.len(),
            warnings = warnings.len(),
            "导入完成"
        );

        Ok(ImportReport {
            batch_id,
            imported: ids.len(),
            ids,
            rejected,
            warnings,
            message,
        })
    }
}
