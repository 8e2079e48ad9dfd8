// ==========================================
// 员工离职管理 - 时间过滤引擎
// ==========================================
// 职责: 按离职日期的年/月过滤记录（驾驶舱、月度下钻共用）
// 约束: 月份对外从 0 开始（0 = 一月，11 = 十二月）
// 约束: 只看 exit_date；存储层已排除无法解析日期的记录
// ==========================================

use crate::domain::exit::ExitRecord;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_YEAR: i64 = 1900;
pub const MAX_YEAR: i64 = 9999;

/// 过滤参数错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterInputError {
    #[error("月份超出范围（从 0 开始，0-11）: {0}")]
    MonthOutOfRange(i64),

    #[error("年份超出范围（1900-9999）: {0}")]
    YearOutOfRange(i64),
}

// ==========================================
// ExitFilter - 年/月过滤条件
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitFilter {
    pub year: Option<i32>,
    /// 从 0 开始的月份
    pub month: Option<u32>,
}

impl ExitFilter {
    /// 校验并构造过滤条件
    ///
    /// 只给月份不给年份时，匹配任意年份的该月
    pub fn new(year: Option<i64>, month: Option<i64>) -> Result<Self, FilterInputError> {
        let year = match year {
            Some(y) if !(MIN_YEAR..=MAX_YEAR).contains(&y) => {
                return Err(FilterInputError::YearOutOfRange(y))
            }
            Some(y) => Some(y as i32),
            None => None,
        };
        let month = match month {
            Some(m) if !(0..=11).contains(&m) => return Err(FilterInputError::MonthOutOfRange(m)),
            Some(m) => Some(m as u32),
            None => None,
        };
        Ok(Self { year, month })
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none()
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        self.year.map_or(true, |y| date.year() == y) && self.month.map_or(true, |m| date.month0() == m)
    }
}

// ==========================================
// FilterEngine
// ==========================================
pub struct FilterEngine;

impl FilterEngine {
    /// 过滤记录（保持输入顺序）
    pub fn apply(records: Vec<ExitRecord>, filter: &ExitFilter) -> Vec<ExitRecord> {
        if filter.is_empty() {
            return records;
        }
        records
            .into_iter()
            .filter(|r| filter.matches(r.data.exit_date))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exit::{CompanyDetails, ExitData, ExitDetails};
    use chrono::Utc;

    fn record(id: &str, y: i32, m: u32, d: u32) -> ExitRecord {
        ExitRecord {
            id: id.to_string(),
            created_at: Utc::now(),
            data: ExitData {
                full_name: id.to_string(),
                admission_date: None,
                exit_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                tenure_days: None,
                sex: None,
                manager: None,
                age: None,
                details: ExitDetails::Company(CompanyDetails::default()),
            },
        }
    }

    #[test]
    fn test_month_is_zero_based() {
        let filter = ExitFilter::new(Some(2024), Some(0)).unwrap();
        let kept = FilterEngine::apply(
            vec![record("jan", 2024, 1, 31), record("fev", 2024, 2, 1)],
            &filter,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "jan");
    }

    #[test]
    fn test_month_without_year_matches_any_year() {
        let filter = ExitFilter::new(None, Some(2)).unwrap();
        let kept = FilterEngine::apply(
            vec![
                record("a", 2023, 3, 5),
                record("b", 2024, 3, 9),
                record("c", 2024, 4, 1),
            ],
            &filter,
        );
        let ids: Vec<_> = kept.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_year_only() {
        let filter = ExitFilter::new(Some(2023), None).unwrap();
        let kept = FilterEngine::apply(
            vec![record("a", 2023, 12, 31), record("b", 2024, 1, 1)],
            &filter,
        );
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = ExitFilter::default();
        let kept = FilterEngine::apply(vec![record("a", 2023, 1, 1), record("b", 2024, 1, 1)], &filter);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert_eq!(
            ExitFilter::new(None, Some(12)),
            Err(FilterInputError::MonthOutOfRange(12))
        );
        assert_eq!(
            ExitFilter::new(None, Some(-1)),
            Err(FilterInputError::MonthOutOfRange(-1))
        );
        assert_eq!(
            ExitFilter::new(Some(20240), None),
            Err(FilterInputError::YearOutOfRange(20240))
        );
    }
}
