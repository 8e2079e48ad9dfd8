// ==========================================
// 员工离职管理 - 日期规范化
// ==========================================
// 职责: 异构日期表示 → 标准日期（YYYY-MM-DD）
// 规则顺序: ISO 字符串 → 本地化 NN/NN/YYYY → 表格序列号 → 失败
// 红线: 无法识别时返回 DateParseError，绝不回退为“今天”
// ==========================================

use crate::domain::import::CellValue;
use crate::domain::types::DateOrder;
use crate::importer::error::DateParseError;
use chrono::{Duration, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// 表格序列号纪元偏移: 序列号 25569 = 1970-01-01（1900 纪元）
pub const SPREADSHEET_EPOCH_OFFSET_DAYS: i64 = 25569;

/// 序列号合理上限（约公元 2173 年），超出视为非日期数值
const MAX_SERIAL: f64 = 100_000.0;

fn re_iso() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 可选时间部分: HH:MM[:SS[.fff]][Z|±HH:MM]
    RE.get_or_init(|| {
        Regex::new(
            r"^(\d{4})-(\d{2})-(\d{2})(?:[T ]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?)?$",
        )
        .unwrap()
    })
}

fn re_locale() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4})$").unwrap())
}

fn re_numeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d+(?:[.,]\d+)?$").unwrap())
}

// NaiveDate 默认值即 1970-01-01
fn unix_epoch() -> NaiveDate {
    NaiveDate::default()
}

// ==========================================
// DateNormalizer
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct DateNormalizer {
    order: DateOrder,
}

impl DateNormalizer {
    /// # 参数
    /// - order: NN/NN/YYYY 的优先解读顺序；按该顺序不合法时尝试另一顺序
    pub fn new(order: DateOrder) -> Self {
        Self { order }
    }

    /// 规范化单元格值
    pub fn normalize(&self, value: &CellValue) -> Result<NaiveDate, DateParseError> {
        match value {
            CellValue::Number(serial) => Self::from_serial(*serial),
            CellValue::Text(raw) => self.normalize_str(raw),
            CellValue::Empty => Err(DateParseError::unrecognized("")),
            CellValue::Bool(b) => Err(DateParseError::unrecognized(b.to_string())),
        }
    }

    /// 规范化文本日期
    pub fn normalize_str(&self, raw: &str) -> Result<NaiveDate, DateParseError> {
        let trimmed = raw.trim();

        // 规则 1: YYYY-MM-DD（允许带时间部分）
        if let Some(caps) = re_iso().captures(trimmed) {
            return ymd(&caps[1], &caps[2], &caps[3])
                .ok_or_else(|| DateParseError::out_of_range(trimmed));
        }

        // 规则 2: DD/MM/YYYY 或 MM/DD/YYYY
        if let Some(caps) = re_locale().captures(trimmed) {
            let (first, second, year) = (&caps[1], &caps[2], &caps[3]);
            let (preferred, alternate) = match self.order {
                DateOrder::Dmy => (ymd(year, second, first), ymd(year, first, second)),
                DateOrder::Mdy => (ymd(year, first, second), ymd(year, second, first)),
            };
            return preferred
                .or(alternate)
                .ok_or_else(|| DateParseError::out_of_range(trimmed));
        }

        // 规则 3: 以文本形式保存的序列号（CSV 导出常见）
        if re_numeric().is_match(trimmed) {
            if let Ok(serial) = trimmed.replace(',', ".").parse::<f64>() {
                return Self::from_serial(serial).map_err(|mut e| {
                    e.raw = trimmed.to_string();
                    e
                });
            }
        }

        // 规则 4: 无法识别
        Err(DateParseError::unrecognized(trimmed))
    }

    /// 表格序列号 → UTC 日历日期（小数部分为时间，忽略）
    pub fn from_serial(serial: f64) -> Result<NaiveDate, DateParseError> {
        if !serial.is_finite() || serial < 0.0 || serial > MAX_SERIAL {
            return Err(DateParseError::out_of_range(serial.to_string()));
        }

        let days = serial.floor() as i64 - SPREADSHEET_EPOCH_OFFSET_DAYS;
        unix_epoch()
            .checked_add_signed(Duration::days(days))
            .ok_or_else(|| DateParseError::out_of_range(serial.to_string()))
    }

    /// 标准日期 → 表格序列号
    pub fn to_serial(date: NaiveDate) -> i64 {
        (date - unix_epoch()).num_days() + SPREADSHEET_EPOCH_OFFSET_DAYS
    }

    /// 标准字符串形式（YYYY-MM-DD）
    pub fn canonical(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_string_accepted_as_is() {
        let normalizer = DateNormalizer::default();
        assert_eq!(normalizer.normalize_str("2023-01-15"), Ok(date(2023, 1, 15)));
        assert_eq!(
            normalizer.normalize_str("2023-01-15T00:00:00Z"),
            Ok(date(2023, 1, 15))
        );
        assert_eq!(
            normalizer.normalize_str("2023-01-15 08:30:00.000-03:00"),
            Ok(date(2023, 1, 15))
        );
    }

    #[test]
    fn test_iso_date_with_trailing_garbage_rejected() {
        let normalizer = DateNormalizer::default();
        let err = normalizer.normalize_str("2023-01-15 lixo").unwrap_err();
        assert_eq!(err, DateParseError::unrecognized("2023-01-15 lixo"));
        assert!(normalizer.normalize_str("2023-01-15T").is_err());
    }

    #[test]
    fn test_iso_string_impossible_date_rejected() {
        let normalizer = DateNormalizer::default();
        let err = normalizer.normalize_str("2023-02-30").unwrap_err();
        assert_eq!(err.reason, "out of range");
        assert_eq!(err.raw, "2023-02-30");
    }

    #[test]
    fn test_locale_day_first_by_default() {
        let normalizer = DateNormalizer::new(DateOrder::Dmy);
        assert_eq!(normalizer.normalize_str("03/04/2023"), Ok(date(2023, 4, 3)));
    }

    #[test]
    fn test_locale_month_first_when_configured() {
        let normalizer = DateNormalizer::new(DateOrder::Mdy);
        assert_eq!(normalizer.normalize_str("03/04/2023"), Ok(date(2023, 3, 4)));
    }

    #[test]
    fn test_locale_unambiguous_order_resolved() {
        // 25 只能是日
        let normalizer = DateNormalizer::new(DateOrder::Mdy);
        assert_eq!(normalizer.normalize_str("25/12/2022"), Ok(date(2022, 12, 25)));
    }

    #[test]
    fn test_serial_number() {
        let normalizer = DateNormalizer::default();
        assert_eq!(
            normalizer.normalize(&CellValue::Number(25569.0)),
            Ok(date(1970, 1, 1))
        );
        assert_eq!(
            normalizer.normalize(&CellValue::Number(44927.0)),
            Ok(date(2023, 1, 1))
        );
        assert_eq!(
            normalizer.normalize(&CellValue::Number(44941.75)),
            Ok(date(2023, 1, 15))
        );
    }

    #[test]
    fn test_serial_as_text() {
        let normalizer = DateNormalizer::default();
        assert_eq!(normalizer.normalize_str("44941"), Ok(date(2023, 1, 15)));
    }

    #[test]
    fn test_serial_roundtrip() {
        for d in [date(1970, 1, 1), date(2000, 2, 29), date(2023, 1, 15), date(2031, 12, 31)] {
            let serial = DateNormalizer::to_serial(d);
            assert_eq!(DateNormalizer::from_serial(serial as f64), Ok(d));
        }
    }

    #[test]
    fn test_unrecognized_returns_typed_failure() {
        let normalizer = DateNormalizer::default();
        let err = normalizer.normalize_str("ontem").unwrap_err();
        assert_eq!(err, DateParseError::unrecognized("ontem"));

        assert!(normalizer.normalize(&CellValue::Bool(true)).is_err());
        assert!(normalizer.normalize(&CellValue::Number(f64::NAN)).is_err());
        assert!(normalizer.normalize(&CellValue::Number(-3.0)).is_err());
    }

    #[test]
    fn test_canonical_format() {
        assert_eq!(DateNormalizer::canonical(date(2023, 1, 5)), "2023-01-05");
    }
}
