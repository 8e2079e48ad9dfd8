// ==========================================
// 员工离职管理 - 数据清洗器实现
// ==========================================
// 职责: NULL 标准化 / 表头规范化 / 是否标记解析
// ==========================================

use crate::importer::exit_importer_trait::DataCleaner as DataCleanerTrait;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn normalize_header(&self, header: &str) -> String {
        let compact: String = header
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        strip_diacritics(&compact)
    }

    fn parse_flag(&self, value: &str) -> Option<bool> {
        let folded = strip_diacritics(&value.trim().to_lowercase());
        match folded.as_str() {
            "sim" | "s" | "yes" | "y" | "true" | "1" | "x" => Some(true),
            "nao" | "n" | "no" | "false" | "0" => Some(false),
            _ => None,
        }
    }
}

/// 去除重音符号（NFD 分解后剔除组合附加符）
pub fn strip_diacritics(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// 折叠为仅含字母数字的小写串（用于工作表名、类型编码比较）
pub fn fold_key(value: &str) -> String {
    strip_diacritics(&value.to_lowercase())
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}
