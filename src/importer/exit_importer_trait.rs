// ==========================================
// 员工离职管理 - 离职导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 行规范化 → 校验 → 批次落库
// ==========================================

use crate::domain::exit::ExitForm;
use crate::domain::import::{ExitDraft, ImportReport, RawRow, ValidatedExit, ValidationRejection};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// ExitImporter Trait
// ==========================================
// 用途: 离职记录导入主接口
// 实现者: ExitImporterImpl
#[async_trait]
pub trait ExitImporter: Send + Sync {
    /// 从文件导入（.xlsx / .xls / .csv）
    ///
    /// # 返回
    /// - Ok(ImportReport): 至少一条记录已落库
    /// - Err(NoRecognizedSheet): 工作簿中没有可识别的工作表（未处理任何行）
    /// - Err(NoValidRows): 所有行均被拒绝（未落库）
    /// - Err(Commit): 校验通过但存储层整体拒绝
    async fn import_file(&self, file_path: &Path) -> ImportResult<ImportReport>;

    /// 导入已解析的原始行
    ///
    /// 逐行独立处理，单行失败不影响后续行
    async fn import_rows(&self, rows: Vec<RawRow>) -> ImportResult<ImportReport>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: WorkbookParser, CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行（表头行不计入结果）
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// RowNormalizer Trait
// ==========================================
// 用途: 原始行 → 草稿（阶段 1）
// 实现者: FieldMapper
pub trait RowNormalizer: Send + Sync {
    /// 规范化原始行
    ///
    /// 不会失败: 单元格级错误（日期/司龄）保留在草稿中，由校验器统一判定
    fn normalize_row(&self, row: &RawRow) -> ExitDraft;

    /// 人工表单 → 草稿（司龄只走日期对模式）
    fn normalize_form(&self, form: &ExitForm) -> ExitDraft;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 文本清洗接口
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// 表头规范化: 小写、去空白、去重音
    ///
    /// # 示例
    /// - "Nome Completo" → "nomecompleto"
    /// - "Data de Admissão" → "datadeadmissao"
    fn normalize_header(&self, header: &str) -> String;

    /// 解析是/否标记
    ///
    /// # 返回
    /// - Some(true/false): 可识别（sim/não/yes/no/true/false/1/0/x）
    /// - None: 无法识别
    fn parse_flag(&self, value: &str) -> Option<bool>;
}

// ==========================================
// RecordValidator Trait
// ==========================================
// 用途: 草稿 → 已校验记录（阶段 2）
// 实现者: ExitValidator
pub trait RecordValidator: Send + Sync {
    /// 校验草稿
    ///
    /// # 返回
    /// - Ok(ValidatedExit): 可落库（可能附带提示）
    /// - Err(ValidationRejection): 行被拒绝，附全部原因
    fn validate(&self, draft: ExitDraft) -> Result<ValidatedExit, ValidationRejection>;
}
