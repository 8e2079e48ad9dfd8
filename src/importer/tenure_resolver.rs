// ==========================================
// 员工离职管理 - 司龄计算
// ==========================================
// 模式 1（优先）: 日期对 → 天数差，必须 > 0
// 模式 2（兜底）: 文本描述 "2 anos, 3 meses" → 365/30/1 近似折算
// ==========================================

use crate::importer::data_cleaner::strip_diacritics;
use crate::importer::error::NegativeTenureError;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 30;

fn re_years() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*ANOS?").unwrap())
}

fn re_months() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*MES(?:ES)?").unwrap())
}

fn re_days() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*DIAS?").unwrap())
}

pub struct TenureResolver;

impl TenureResolver {
    /// 按日期对计算司龄（天）
    pub fn from_dates(
        admission: NaiveDate,
        exit: NaiveDate,
    ) -> Result<i64, NegativeTenureError> {
        let days = (exit - admission).num_days();
        if days <= 0 {
            return Err(NegativeTenureError { days });
        }
        Ok(days)
    }

    /// 解析文本描述（大小写、重音不敏感）
    ///
    /// 无可识别片段或合计为 0 时返回 None
    pub fn from_descriptor(descriptor: &str) -> Option<i64> {
        let folded = strip_diacritics(descriptor.trim()).to_uppercase();
        if folded.is_empty() {
            return None;
        }

        let years = token(re_years(), &folded);
        let months = token(re_months(), &folded);
        let days = token(re_days(), &folded);
        let total = years
            .saturating_mul(DAYS_PER_YEAR)
            .saturating_add(months.saturating_mul(DAYS_PER_MONTH))
            .saturating_add(days);

        if total == 0 {
            None
        } else {
            Some(total)
        }
    }

    /// 组合解析: 两个日期都有效时只用日期对，否则回退到文本描述
    pub fn resolve(
        admission: Option<NaiveDate>,
        exit: Option<NaiveDate>,
        descriptor: Option<&str>,
    ) -> Result<Option<i64>, NegativeTenureError> {
        match (admission, exit) {
            (Some(admission), Some(exit)) => Self::from_dates(admission, exit).map(Some),
            _ => Ok(descriptor.and_then(Self::from_descriptor)),
        }
    }
}

fn token(re: &Regex, text: &str) -> i64 {
    re.captures(text)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_dates_exact_difference() {
        assert_eq!(TenureResolver::from_dates(date(2022, 1, 1), date(2023, 1, 1)), Ok(365));
        assert_eq!(TenureResolver::from_dates(date(2024, 2, 28), date(2024, 3, 1)), Ok(2));
    }

    #[test]
    fn test_from_dates_rejects_non_positive() {
        assert_eq!(
            TenureResolver::from_dates(date(2023, 1, 1), date(2023, 1, 1)),
            Err(NegativeTenureError { days: 0 })
        );
        assert_eq!(
            TenureResolver::from_dates(date(2023, 1, 10), date(2023, 1, 1)),
            Err(NegativeTenureError { days: -9 })
        );
    }

    #[test]
    fn test_descriptor_sums_tokens() {
        assert_eq!(TenureResolver::from_descriptor("2 anos, 3 meses"), Some(820));
        assert_eq!(TenureResolver::from_descriptor("1 ANO 1 MÊS 1 DIA"), Some(396));
        assert_eq!(TenureResolver::from_descriptor("10 dias"), Some(10));
        assert_eq!(TenureResolver::from_descriptor("6mes"), Some(180));
    }

    #[test]
    fn test_descriptor_without_tokens() {
        assert_eq!(TenureResolver::from_descriptor("pouco tempo"), None);
        assert_eq!(TenureResolver::from_descriptor("0 anos"), None);
        assert_eq!(TenureResolver::from_descriptor("   "), None);
        assert_eq!(TenureResolver::from_descriptor("365"), None);
    }

    #[test]
    fn test_resolve_prefers_date_pair() {
        let resolved = TenureResolver::resolve(
            Some(date(2023, 1, 1)),
            Some(date(2023, 1, 31)),
            Some("5 anos"),
        );
        assert_eq!(resolved, Ok(Some(30)));
    }

    #[test]
    fn test_resolve_falls_back_to_descriptor() {
        let resolved = TenureResolver::resolve(None, Some(date(2023, 1, 31)), Some("2 meses"));
        assert_eq!(resolved, Ok(Some(60)));

        assert_eq!(TenureResolver::resolve(None, Some(date(2023, 1, 31)), None), Ok(None));
    }
}
