// ==========================================
// 员工离职管理 - 驾驶舱聚合结果
// ==========================================
// 职责: 定义驾驶舱派生指标结构
// 红线: 按需计算，不落库，无独立生命周期
// ==========================================

use crate::domain::types::ExitType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// AggregationResult - 驾驶舱聚合结果
// ==========================================
// 不变量: total_exits == total_voluntary + total_company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub total_exits: usize,
    pub total_voluntary: usize,
    pub total_company: usize,
    /// 平均司龄（月），无有效司龄数据时为 None
    pub average_tenure_months: Option<i64>,
    pub monthly_series: Vec<MonthlySlot>,
    pub by_sector: Vec<BreakdownEntry>,
    pub by_reason: Vec<BreakdownEntry>,
    pub recent_exits: Vec<RecentExitView>,
    pub type_distribution: TypeDistribution,
}

/// 月度序列中的一个槽位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySlot {
    pub year: i32,
    /// 月份（从 0 开始，0 = 一月）
    pub month: u32,
    pub name: String,
    pub voluntary: usize,
    pub company: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentExitView {
    pub name: String,
    pub tenure_months: Option<i64>,
    pub exit_type: ExitType,
    pub type_label: String,
    pub exit_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeBucket {
    pub exit_type: ExitType,
    pub label: String,
    pub value: usize,
}

/// 固定两桶: 主动离职 / 公司辞退
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDistribution {
    pub voluntary: TypeBucket,
    pub company: TypeBucket,
}

// ==========================================
// MonthlyExitView - 月度下钻列表项
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExitView {
    pub id: String,
    pub name: String,
    pub job_title: Option<String>,
    pub exit_type: ExitType,
    pub type_label: String,
    pub exit_date: NaiveDate,
}
