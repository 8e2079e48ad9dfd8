// ==========================================
// 员工离职管理 - 导入领域模型
// ==========================================
// 职责: 导入管道中间产物（原始行 → 草稿 → 校验结果 → 导入报告）
// 生命周期: 仅在导入流程内，不落库
// ==========================================

use crate::domain::exit::ExitData;
use crate::domain::types::ExitType;
use crate::importer::error::{DateParseError, NegativeTenureError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CellValue - 单元格原始值
// ==========================================
// 表格日期单元格以序列号（Number）形式传递
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// 空单元格或纯空白文本
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 转为去空白文本（Empty 返回 None）
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(s.trim().to_string()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

// ==========================================
// RowOrigin - 行来源（用于诊断定位）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOrigin {
    pub sheet: Option<String>,
    pub row_number: usize, // 表格中的行号（表头为第 1 行）
}

// ==========================================
// RawRow - 文件解析产物
// ==========================================
// cells: (原始表头, 单元格)，按文件列顺序（表头大小写/重音/空白不受约束）
// type_hint: 由工作表决定；CSV 等单表来源为 None，改读 tipo 列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub origin: RowOrigin,
    pub type_hint: Option<ExitType>,
    pub cells: Vec<(String, CellValue)>,
}

impl RawRow {
    /// 按原始表头精确查找（第一个同名列）
    pub fn cell(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value)
    }

    /// 整行空白
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.is_blank())
    }
}

// ==========================================
// ExitDraft - 字段映射后的草稿
// ==========================================
// 约束: 表中不存在的字段保持 None（不填空串），
//       Some("") 表示“显式为空”，由校验器统一置空
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExitDraft {
    pub origin: RowOrigin,
    pub exit_type: Option<ExitType>,
    pub type_label: Option<String>,

    // ===== 共有字段 =====
    pub full_name: Option<String>,
    pub admission_date: Option<Result<NaiveDate, DateParseError>>,
    pub exit_date: Option<Result<NaiveDate, DateParseError>>,
    pub tenure_days: Option<Result<i64, NegativeTenureError>>,
    pub sex: Option<String>,
    pub manager: Option<String>,
    pub age: Option<i64>,

    // ===== 主动离职 =====
    pub neighborhood: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub reason: Option<String>,
    pub prior_industry_experience: Option<String>,
    pub education_level: Option<String>,
    pub commute: Option<String>,
    pub leadership_score: Option<i64>,
    pub leadership_notes: Option<String>,
    pub hr_score: Option<i64>,
    pub hr_notes: Option<String>,
    pub company_score: Option<i64>,
    pub company_notes: Option<String>,
    pub comments: Option<String>,
    pub filter_tag: Option<String>,

    // ===== 公司辞退 =====
    pub shift: Option<String>,
}

// ==========================================
// RejectionReason - 行级拒绝原因
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum RejectionReason {
    MissingName,
    MissingExitDate,
    InvalidExitDate { raw: String },
    InvalidAdmissionDate { raw: String },
    ExitBeforeAdmission,
    UnknownExitType { raw: String },
}

impl RejectionReason {
    pub fn message(&self) -> String {
        use crate::i18n::{t, t_with_args};
        match self {
            RejectionReason::MissingName => t("reject.missing_name"),
            RejectionReason::MissingExitDate => t("reject.missing_exit_date"),
            RejectionReason::InvalidExitDate { raw } => {
                t_with_args("reject.invalid_exit_date", &[("raw", raw)])
            }
            RejectionReason::InvalidAdmissionDate { raw } => {
                t_with_args("reject.invalid_admission_date", &[("raw", raw)])
            }
            RejectionReason::ExitBeforeAdmission => t("reject.exit_before_admission"),
            RejectionReason::UnknownExitType { raw } => {
                t_with_args("reject.unknown_exit_type", &[("raw", raw)])
            }
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

// ==========================================
// ValidationRejection - 行级校验拒绝
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRejection {
    pub origin: RowOrigin,
    pub full_name: Option<String>,
    pub reasons: Vec<RejectionReason>,
}

impl ValidationRejection {
    pub fn has_reason(&self, reason: &RejectionReason) -> bool {
        self.reasons.contains(reason)
    }
}

impl fmt::Display for ValidationRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reasons = self
            .reasons
            .iter()
            .map(|r| r.message())
            .collect::<Vec<_>>()
            .join("; ");
        match &self.origin.sheet {
            Some(sheet) => write!(f, "[{} #{}] {}", sheet, self.origin.row_number, reasons),
            None => write!(f, "[#{}] {}", self.origin.row_number, reasons),
        }
    }
}

impl std::error::Error for ValidationRejection {}

// ==========================================
// ValidationWarning - 不阻断的校验提示
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum WarningKind {
    MissingRecommended,
    RatingOutOfRange { value: i64 },
    UnrecognizedValue { value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub origin: RowOrigin,
    pub field: String,
    pub kind: WarningKind,
}

impl ValidationWarning {
    pub fn message(&self) -> String {
        use crate::i18n::t_with_args;
        match &self.kind {
            WarningKind::MissingRecommended => {
                t_with_args("warn.missing_recommended", &[("field", &self.field)])
            }
            WarningKind::RatingOutOfRange { value } => t_with_args(
                "warn.rating_out_of_range",
                &[("field", &self.field), ("value", &value.to_string())],
            ),
            WarningKind::UnrecognizedValue { value } => t_with_args(
                "warn.unrecognized_value",
                &[("field", &self.field), ("value", value)],
            ),
        }
    }
}

// ==========================================
// ValidatedExit - 校验通过的记录
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedExit {
    pub origin: RowOrigin,
    pub data: ExitData,
    pub warnings: Vec<ValidationWarning>,
}

// ==========================================
// BatchValidation - 批量校验结果（落库前）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchValidation {
    pub accepted: Vec<ExitData>,
    pub rejected: Vec<ValidationRejection>,
    pub warnings: Vec<ValidationWarning>,
}

// ==========================================
// ImportReport - 导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,
    pub imported: usize,
    pub ids: Vec<String>,
    pub rejected: Vec<ValidationRejection>,
    pub warnings: Vec<ValidationWarning>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::text("   ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_cell_value_as_text() {
        assert_eq!(CellValue::Number(44927.0).as_text(), Some("44927".to_string()));
        assert_eq!(CellValue::Number(7.5).as_text(), Some("7.5".to_string()));
        assert_eq!(CellValue::text("  Ana ").as_text(), Some("Ana".to_string()));
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn test_rejection_has_reason() {
        let rejection = ValidationRejection {
            origin: RowOrigin {
                sheet: Some("pedido demissao".to_string()),
                row_number: 3,
            },
            full_name: None,
            reasons: vec![RejectionReason::MissingName],
        };

        assert!(rejection.has_reason(&RejectionReason::MissingName));
        assert!(!rejection.has_reason(&RejectionReason::ExitBeforeAdmission));
    }
}
