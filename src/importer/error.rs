// ==========================================
// 员工离职管理 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分层: 单元格级（日期/司龄）→ 行级（ValidationRejection）→ 批次级（本文件 ImportError）
// ==========================================

use crate::domain::import::ValidationRejection;
use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 日期无法识别（不回退为“今天”，也不静默跳过）
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("日期解析失败 ({reason}): {raw}")]
pub struct DateParseError {
    pub reason: String,
    pub raw: String,
}

impl DateParseError {
    pub fn unrecognized(raw: impl Into<String>) -> Self {
        Self {
            reason: "unrecognized format".to_string(),
            raw: raw.into(),
        }
    }

    pub fn out_of_range(raw: impl Into<String>) -> Self {
        Self {
            reason: "out of range".to_string(),
            raw: raw.into(),
        }
    }
}

/// 离职日期不晚于入职日期
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("司龄非正数: {days} 天")]
pub struct NegativeTenureError {
    pub days: i64,
}

/// 批次落库失败（存储层整体拒绝）
///
/// 与“没有有效行”区分: 这里的输入已通过校验，重试同一输入可能成功
#[derive(Error, Debug)]
#[error("批次落库失败 ({attempted} 条已通过校验): {source}")]
pub struct ImportCommitError {
    pub attempted: usize,
    pub rejected: Vec<ValidationRejection>,
    #[source]
    pub source: RepositoryError,
}

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("未找到可识别的工作表（需要 'pedido demissao' 和/或 'demissao empresa'），实际: {found:?}")]
    NoRecognizedSheet { found: Vec<String> },

    // ===== 校验结果 =====
    #[error("没有可导入的有效记录（共 {} 行被拒绝）", .rejected.len())]
    NoValidRows { rejected: Vec<ValidationRejection> },

    // ===== 存储错误 =====
    #[error(transparent)]
    Commit(#[from] ImportCommitError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 用户提示（当前语言）
    pub fn user_message(&self) -> String {
        use crate::i18n::{t, t_with_args};
        match self {
            ImportError::FileNotFound(path) => {
                t_with_args("import.file_not_found", &[("path", path)])
            }
            ImportError::NoRecognizedSheet { .. } => t("import.no_sheet"),
            ImportError::NoValidRows { .. } => t("import.no_valid_rows"),
            ImportError::Commit(e) => {
                t_with_args("import.commit_failed", &[("error", &e.source.to_string())])
            }
            other => other.to_string(),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
