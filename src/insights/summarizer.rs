// ==========================================
// 员工离职管理 - 摘要服务接口与输入投影
// ==========================================
// 输入: 仅主动离职记录
// 投影规则: 缺失文本 → "N/A"，行业经验 → "sim"/"não"，备注缺失 → ""
// ==========================================

use crate::domain::exit::{ExitDetails, ExitRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const NOT_AVAILABLE: &str = "N/A";
const FLAG_YES: &str = "sim";
const FLAG_NO: &str = "não";

// ==========================================
// SummarizerError - 摘要服务错误
// ==========================================
#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("摘要服务不可用: {0}")]
    Unavailable(String),

    #[error("摘要服务返回无效结果: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// ExitSummarizer Trait
// ==========================================
// 实现者: 外部文本生成服务（测试中为 mock）
#[async_trait]
pub trait ExitSummarizer: Send + Sync {
    /// 基于主动离职摘要生成洞察文本
    async fn summarize(&self, digests: &[VoluntaryExitDigest]) -> Result<String, SummarizerError>;
}

// ==========================================
// VoluntaryExitDigest - 主动离职投影
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoluntaryExitDigest {
    pub exit_date: String,
    pub tenure_days: String,
    pub full_name: String,
    pub neighborhood: String,
    pub age: u32,
    pub sex: String,
    pub job_title: String,
    pub department: String,
    pub manager: String,
    pub reason: String,
    pub prior_industry_experience: String,
    pub education_level: String,
    pub commute: String,
    pub leadership_score: Option<u8>,
    pub leadership_notes: String,
    pub hr_score: Option<u8>,
    pub hr_notes: String,
    pub company_score: Option<u8>,
    pub comments: String,
}

fn or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn or_empty(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

impl VoluntaryExitDigest {
    /// 投影一条记录；公司辞退记录返回 None
    pub fn from_record(record: &ExitRecord) -> Option<Self> {
        let ExitDetails::Voluntary(details) = &record.data.details else {
            return None;
        };
        let data = &record.data;

        Some(Self {
            exit_date: data.exit_date.format("%Y-%m-%d").to_string(),
            tenure_days: data
                .tenure_days
                .map(|d| d.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            full_name: data.full_name.clone(),
            neighborhood: or_na(details.neighborhood.as_deref()),
            age: data.age.unwrap_or(0),
            sex: or_na(data.sex.as_deref()),
            job_title: or_na(details.job_title.as_deref()),
            department: or_na(details.department.as_deref()),
            manager: or_na(data.manager.as_deref()),
            reason: or_na(details.reason.as_deref()),
            prior_industry_experience: if details.prior_industry_experience == Some(true) {
                FLAG_YES.to_string()
            } else {
                FLAG_NO.to_string()
            },
            education_level: or_na(details.education_level.as_deref()),
            commute: or_na(details.commute.as_deref()),
            leadership_score: details.leadership_score,
            leadership_notes: or_empty(details.leadership_notes.as_deref()),
            hr_score: details.hr_score,
            hr_notes: or_empty(details.hr_notes.as_deref()),
            company_score: details.company_score,
            comments: or_empty(details.comments.as_deref()),
        })
    }
}
