// ==========================================
// 员工离职管理 - 离职记录领域模型
// ==========================================
// 职责: 定义已落库的离职记录（两种变体）与人工登记表单
// 约束: tenure_days 只由系统派生，不接受人工录入
// ==========================================

use crate::domain::types::ExitType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ExitRecord - 已落库离职记录
// ==========================================
// id / created_at 由存储层分配，创建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: ExitData,
}

impl ExitRecord {
    pub fn exit_type(&self) -> ExitType {
        self.data.exit_type()
    }
}

// ==========================================
// ExitData - 离职记录可变内容
// ==========================================
// 不变量: admission_date 与 exit_date 同时存在时,
//         tenure_days == exit_date - admission_date 且 > 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitData {
    // ===== 共有字段 =====
    pub full_name: String,
    pub admission_date: Option<NaiveDate>,
    pub exit_date: NaiveDate,
    pub tenure_days: Option<i64>,
    pub sex: Option<String>,
    pub manager: Option<String>,
    pub age: Option<u32>,

    // ===== 变体字段 =====
    #[serde(flatten)]
    pub details: ExitDetails,
}

impl ExitData {
    pub fn exit_type(&self) -> ExitType {
        match self.details {
            ExitDetails::Voluntary(_) => ExitType::Voluntary,
            ExitDetails::Company(_) => ExitType::Company,
        }
    }

    /// 离职原因（两种变体都有）
    pub fn reason(&self) -> Option<&str> {
        match &self.details {
            ExitDetails::Voluntary(v) => v.reason.as_deref(),
            ExitDetails::Company(c) => c.reason.as_deref(),
        }
    }

    /// 部门（仅主动离职）
    pub fn department(&self) -> Option<&str> {
        match &self.details {
            ExitDetails::Voluntary(v) => v.department.as_deref(),
            ExitDetails::Company(_) => None,
        }
    }

    /// 岗位（仅主动离职）
    pub fn job_title(&self) -> Option<&str> {
        match &self.details {
            ExitDetails::Voluntary(v) => v.job_title.as_deref(),
            ExitDetails::Company(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "exit_type")]
pub enum ExitDetails {
    #[serde(rename = "pedido_demissao")]
    Voluntary(VoluntaryDetails),
    #[serde(rename = "demissao_empresa")]
    Company(CompanyDetails),
}

// ==========================================
// VoluntaryDetails - 主动离职（离职面谈）字段
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoluntaryDetails {
    pub neighborhood: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub reason: Option<String>,
    pub prior_industry_experience: Option<bool>,
    pub education_level: Option<String>,
    pub commute: Option<String>,

    // 评分 1-10，超出范围在校验阶段置空
    pub leadership_score: Option<u8>,
    pub leadership_notes: Option<String>,
    pub hr_score: Option<u8>,
    pub hr_notes: Option<String>,
    pub company_score: Option<u8>,
    pub company_notes: Option<String>,

    pub comments: Option<String>,
    pub filter_tag: Option<String>,
}

// ==========================================
// CompanyDetails - 公司辞退字段
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetails {
    pub shift: Option<String>,
    pub reason: Option<String>,
}

// ==========================================
// ExitForm - 人工登记/编辑表单
// ==========================================
// 用途: 展示层提交的原始表单（日期为字符串，需经 DateNormalizer）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitForm {
    pub exit_type: ExitType,
    pub full_name: String,
    pub admission_date: Option<String>,
    pub exit_date: String,
    pub sex: Option<String>,
    pub manager: Option<String>,
    pub age: Option<u32>,

    pub neighborhood: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub reason: Option<String>,
    pub prior_industry_experience: Option<bool>,
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

    pub shift: Option<String>,
}
