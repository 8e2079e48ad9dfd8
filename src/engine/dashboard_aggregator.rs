// ==========================================
// 员工离职管理 - 驾驶舱聚合引擎
// ==========================================
// 职责: 已过滤记录集 → AggregationResult（纯函数，不落库）
// 输入: 过滤后的记录 + 是否有年份过滤 + 参考日期（滚动窗口终点）
// 红线: 司龄为空或 ≤ 0 的记录不进入平均司龄分母
// 红线: 月度序列槽位数量与数据稀疏程度无关
// ==========================================

use crate::domain::dashboard::{
    AggregationResult, BreakdownEntry, MonthlyExitView, MonthlySlot, RecentExitView, TypeBucket,
    TypeDistribution,
};
use crate::domain::exit::ExitRecord;
use crate::domain::types::ExitType;
use crate::i18n::t;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::instrument;

// ==========================================
// AggregationConfig - 聚合参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// 原因分布保留条目数
    pub reason_top_n: usize,
    /// 最近离职条目数
    pub recent_exits_limit: usize,
    /// 无年份过滤时的滚动窗口月数
    pub rolling_window_months: u32,
    /// 天 → 月折算
    pub days_per_month: i64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            reason_top_n: 7,
            recent_exits_limit: 5,
            rolling_window_months: 6,
            days_per_month: 30,
        }
    }
}

// ==========================================
// DashboardAggregator
// ==========================================
pub struct DashboardAggregator {
    config: AggregationConfig,
}

impl Default for DashboardAggregator {
    fn default() -> Self {
        Self::new(AggregationConfig::default())
    }
}

impl DashboardAggregator {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// 计算驾驶舱指标
    ///
    /// # 参数
    /// - records: 已按年/月过滤的记录
    /// - year: 当前年份过滤（Some → 12 个月槽位；None → 截至 today 的滚动窗口）
    /// - today: 参考日期
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn aggregate(
        &self,
        records: &[ExitRecord],
        year: Option<i32>,
        today: NaiveDate,
    ) -> AggregationResult {
        let total_voluntary = records
            .iter()
            .filter(|r| r.exit_type() == ExitType::Voluntary)
            .count();
        let total_company = records.len() - total_voluntary;

        AggregationResult {
            total_exits: records.len(),
            total_voluntary,
            total_company,
            average_tenure_months: self.average_tenure_months(records),
            monthly_series: self.monthly_series(records, year, today),
            by_sector: breakdown(
                records
                    .iter()
                    .filter(|r| r.exit_type() == ExitType::Voluntary)
                    .map(|r| r.data.department()),
                None,
            ),
            // 离职原因图只反映主动离职的原因
            by_reason: breakdown(
                records
                    .iter()
                    .filter(|r| r.exit_type() == ExitType::Voluntary)
                    .map(|r| r.data.reason()),
                Some(self.config.reason_top_n),
            ),
            recent_exits: self.recent_exits(records),
            type_distribution: TypeDistribution {
                voluntary: TypeBucket {
                    exit_type: ExitType::Voluntary,
                    label: ExitType::Voluntary.label(),
                    value: total_voluntary,
                },
                company: TypeBucket {
                    exit_type: ExitType::Company,
                    label: ExitType::Company.label(),
                    value: total_company,
                },
            },
        }
    }

    /// 平均司龄（月）= round(mean(tenure_days > 0) / days_per_month)
    pub fn average_tenure_months(&self, records: &[ExitRecord]) -> Option<i64> {
        let tenures: Vec<i64> = records
            .iter()
            .filter_map(|r| r.data.tenure_days)
            .filter(|days| *days > 0)
            .collect();

        if tenures.is_empty() || self.config.days_per_month <= 0 {
            return None;
        }

        let mean = tenures.iter().sum::<i64>() as f64 / tenures.len() as f64;
        Some((mean / self.config.days_per_month as f64).round() as i64)
    }

    /// 月度序列: 有年份 → 该年 12 个月；无年份 → 截至 today 的最近 N 个月
    pub fn monthly_series(
        &self,
        records: &[ExitRecord],
        year: Option<i32>,
        today: NaiveDate,
    ) -> Vec<MonthlySlot> {
        let keys: Vec<(i32, u32)> = match year {
            Some(y) => (0..12).map(|m| (y, m)).collect(),
            None => {
                let window = self.config.rolling_window_months.max(1) as i32;
                let end = today.year() * 12 + today.month0() as i32;
                ((end - window + 1)..=end)
                    .map(|idx| (idx.div_euclid(12), idx.rem_euclid(12) as u32))
                    .collect()
            }
        };

        let mut slots: Vec<MonthlySlot> = keys
            .into_iter()
            .map(|(year, month)| MonthlySlot {
                year,
                month,
                name: month_name(month),
                voluntary: 0,
                company: 0,
                total: 0,
            })
            .collect();

        let index: HashMap<(i32, u32), usize> = slots
            .iter()
            .enumerate()
            .map(|(i, s)| ((s.year, s.month), i))
            .collect();

        for record in records {
            let date = record.data.exit_date;
            if let Some(&i) = index.get(&(date.year(), date.month0())) {
                let slot = &mut slots[i];
                match record.exit_type() {
                    ExitType::Voluntary => slot.voluntary += 1,
                    ExitType::Company => slot.company += 1,
                }
                slot.total += 1;
            }
        }

        slots
    }

    /// 最近离职（按离职日期降序，同日保持输入顺序）
    pub fn recent_exits(&self, records: &[ExitRecord]) -> Vec<RecentExitView> {
        let mut sorted: Vec<&ExitRecord> = records.iter().collect();
        sorted.sort_by_key(|r| Reverse(r.data.exit_date));

        sorted
            .into_iter()
            .take(self.config.recent_exits_limit)
            .map(|r| RecentExitView {
                name: r.data.full_name.clone(),
                tenure_months: self.tenure_months(r.data.tenure_days),
                exit_type: r.exit_type(),
                type_label: r.exit_type().short_label(),
                exit_date: r.data.exit_date,
            })
            .collect()
    }

    /// 月度下钻列表（按离职日期降序）
    pub fn month_listing(&self, records: &[ExitRecord]) -> Vec<MonthlyExitView> {
        let mut sorted: Vec<&ExitRecord> = records.iter().collect();
        sorted.sort_by_key(|r| Reverse(r.data.exit_date));

        sorted
            .into_iter()
            .map(|r| MonthlyExitView {
                id: r.id.clone(),
                name: r.data.full_name.clone(),
                job_title: r.data.job_title().map(str::to_string),
                exit_type: r.exit_type(),
                type_label: r.exit_type().short_label(),
                exit_date: r.data.exit_date,
            })
            .collect()
    }

    fn tenure_months(&self, tenure_days: Option<i64>) -> Option<i64> {
        if self.config.days_per_month <= 0 {
            return None;
        }
        tenure_days
            .filter(|days| *days > 0)
            .map(|days| (days as f64 / self.config.days_per_month as f64).round() as i64)
    }
}

/// 月份展示名（month0 从 0 开始）
pub fn month_name(month0: u32) -> String {
    t(&format!("month.{}", month0 + 1))
}

/// 分组计数 → 降序；同计数保持首次出现顺序
fn breakdown<'a>(
    values: impl Iterator<Item = Option<&'a str>>,
    limit: Option<usize>,
) -> Vec<BreakdownEntry> {
    let not_informed = t("common.not_informed");
    let mut entries: Vec<BreakdownEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for value in values {
        let name = match value.map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => not_informed.clone(),
        };
        match index.get(&name) {
            Some(&i) => entries[i].value += 1,
            None => {
                index.insert(name.clone(), entries.len());
                entries.push(BreakdownEntry { name, value: 1 });
            }
        }
    }

    // sort_by 为稳定排序
    entries.sort_by(|a, b| b.value.cmp(&a.value));
    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exit::{CompanyDetails, ExitData, ExitDetails, VoluntaryDetails};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(name: &str, exit_date: NaiveDate, tenure: Option<i64>, details: ExitDetails) -> ExitRecord {
        ExitRecord {
            id: name.to_string(),
            created_at: Utc::now(),
            data: ExitData {
                full_name: name.to_string(),
                admission_date: None,
                exit_date,
                tenure_days: tenure,
                sex: None,
                manager: None,
                age: None,
                details,
            },
        }
    }

    fn voluntary(name: &str, exit_date: NaiveDate, department: Option<&str>, reason: Option<&str>) -> ExitRecord {
        record(
            name,
            exit_date,
            None,
            ExitDetails::Voluntary(VoluntaryDetails {
                department: department.map(str::to_string),
                reason: reason.map(str::to_string),
                ..Default::default()
            }),
        )
    }

    fn company(name: &str, exit_date: NaiveDate, reason: Option<&str>) -> ExitRecord {
        record(
            name,
            exit_date,
            None,
            ExitDetails::Company(CompanyDetails {
                shift: None,
                reason: reason.map(str::to_string),
            }),
        )
    }

    #[test]
    fn test_totals_are_consistent() {
        let aggregator = DashboardAggregator::default();
        let records = vec![
            voluntary("a", date(2024, 1, 1), None, None),
            company("b", date(2024, 2, 1), None),
            voluntary("c", date(2024, 3, 1), None, None),
        ];

        let result = aggregator.aggregate(&records, Some(2024), date(2024, 6, 1));
        assert_eq!(result.total_exits, 3);
        assert_eq!(result.total_voluntary, 2);
        assert_eq!(result.total_company, 1);
        assert_eq!(result.total_exits, result.total_voluntary + result.total_company);
        assert_eq!(result.type_distribution.voluntary.value, 2);
        assert_eq!(result.type_distribution.company.value, 1);
    }

    #[test]
    fn test_average_tenure_excludes_missing_and_zero() {
        let aggregator = DashboardAggregator::default();
        let details = || ExitDetails::Company(CompanyDetails::default());
        let records = vec![
            record("a", date(2024, 1, 1), Some(30), details()),
            record("b", date(2024, 1, 1), None, details()),
            record("c", date(2024, 1, 1), Some(0), details()),
            record("d", date(2024, 1, 1), Some(60), details()),
        ];

        assert_eq!(aggregator.average_tenure_months(&records), Some(2));
        assert_eq!(aggregator.average_tenure_months(&records[1..3]), None);
    }

    #[test]
    fn test_year_series_has_twelve_slots() {
        let aggregator = DashboardAggregator::default();
        let records = vec![voluntary("a", date(2024, 3, 15), None, None)];

        let series = aggregator.monthly_series(&records, Some(2024), date(2025, 1, 1));
        assert_eq!(series.len(), 12);
        for slot in &series {
            if slot.month == 2 {
                assert_eq!((slot.voluntary, slot.company, slot.total), (1, 0, 1));
            } else {
                assert_eq!(slot.total, 0);
            }
        }
    }

    #[test]
    fn test_rolling_series_crosses_year_boundary() {
        let aggregator = DashboardAggregator::default();
        let records = vec![
            company("a", date(2023, 11, 5), None),
            company("b", date(2022, 11, 5), None),
            voluntary("c", date(2024, 2, 29), None, None),
        ];

        let series = aggregator.monthly_series(&records, None, date(2024, 3, 10));
        let keys: Vec<(i32, u32)> = series.iter().map(|s| (s.year, s.month)).collect();
        assert_eq!(
            keys,
            vec![(2023, 9), (2023, 10), (2023, 11), (2024, 0), (2024, 1), (2024, 2)]
        );
        // 月份需同时匹配年份
        assert_eq!(series[1].company, 1);
        assert_eq!(series[4].voluntary, 1);
        assert_eq!(series.iter().map(|s| s.total).sum::<usize>(), 2);
    }

    #[test]
    fn test_reason_breakdown_truncated_to_top_n() {
        let aggregator = DashboardAggregator::default();
        let records: Vec<ExitRecord> = (0..50)
            .map(|i| {
                voluntary(
                    &format!("p{}", i),
                    date(2024, 1, 1),
                    None,
                    Some(&format!("motivo {}", i)),
                )
            })
            .collect();

        let result = aggregator.aggregate(&records, None, date(2024, 1, 31));
        assert_eq!(result.by_reason.len(), 7);
        // 全部计数相同 → 保持首次出现顺序
        assert_eq!(result.by_reason[0].name, "motivo 0");
        assert_eq!(result.by_reason[6].name, "motivo 6");
    }

    #[test]
    fn test_breakdown_sorted_with_not_informed_label() {
        let aggregator = DashboardAggregator::default();
        let records = vec![
            voluntary("a", date(2024, 1, 1), Some("Produção"), Some("Salário")),
            voluntary("b", date(2024, 1, 2), None, Some("Salário")),
            voluntary("c", date(2024, 1, 3), Some(" "), None),
            voluntary("d", date(2024, 1, 4), Some("Logística"), None),
            company("e", date(2024, 1, 5), Some("Justa causa")),
            company("f", date(2024, 1, 6), Some("Justa causa")),
        ];

        let result = aggregator.aggregate(&records, Some(2024), date(2024, 12, 31));
        let not_informed = t("common.not_informed");

        // 部门只统计主动离职
        assert_eq!(result.by_sector[0], BreakdownEntry { name: not_informed.clone(), value: 2 });
        assert_eq!(result.by_sector.iter().map(|e| e.value).sum::<usize>(), 4);

        // 原因同样只统计主动离职
        assert_eq!(result.by_reason[0], BreakdownEntry { name: "Salário".to_string(), value: 2 });
        assert_eq!(result.by_reason[1], BreakdownEntry { name: not_informed, value: 2 });
        assert_eq!(result.by_reason.len(), 2);
        assert!(result.by_reason.iter().all(|e| e.name != "Justa causa"));
    }

    #[test]
    fn test_recent_exits_newest_first_limited() {
        let aggregator = DashboardAggregator::default();
        let mut records: Vec<ExitRecord> = (1..=7)
            .map(|d| company(&format!("p{}", d), date(2024, 1, d), None))
            .collect();
        records[0].data.tenure_days = Some(45);

        let recent = aggregator.recent_exits(&records);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].name, "p7");
        assert_eq!(recent[4].name, "p3");

        let all = DashboardAggregator::new(AggregationConfig {
            recent_exits_limit: 10,
            ..Default::default()
        })
        .recent_exits(&records);
        assert_eq!(all.last().map(|r| r.tenure_months), Some(Some(2)));
    }

    #[test]
    fn test_month_listing_newest_first() {
        let aggregator = DashboardAggregator::default();
        let records = vec![
            voluntary("a", date(2024, 3, 1), Some("Produção"), None),
            company("b", date(2024, 3, 20), None),
        ];

        let listing = aggregator.month_listing(&records);
        assert_eq!(listing[0].name, "b");
        assert_eq!(listing[0].job_title, None);
        assert_eq!(listing[1].exit_type, ExitType::Voluntary);
    }
}
