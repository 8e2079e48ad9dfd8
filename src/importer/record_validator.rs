// ==========================================
// 员工离职管理 - 记录校验器
// ==========================================
// 拒绝: 姓名为空 / 离职日期缺失或非法 / 入职日期非法 / 离职不晚于入职 / 类型未知
// 提示（不拒绝）: 推荐字段缺失 / 评分越界（置空）/ 是否标记无法识别
// 空值统一存为 None，不保留空串占位
// ==========================================

use crate::domain::exit::{CompanyDetails, ExitData, ExitDetails, VoluntaryDetails};
use crate::domain::import::{
    ExitDraft, RejectionReason, RowOrigin, ValidatedExit, ValidationRejection, ValidationWarning,
    WarningKind,
};
use crate::domain::types::ExitType;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::exit_importer_trait::{DataCleaner as _, RecordValidator};
use crate::importer::tenure_resolver::TenureResolver;

/// 评分有效范围（含两端）
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 10;

pub struct ExitValidator {
    cleaner: DataCleaner,
}

impl Default for ExitValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitValidator {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }
}

/// 单条记录的提示收集器
struct WarningSink<'a> {
    origin: &'a RowOrigin,
    warnings: Vec<ValidationWarning>,
}

impl<'a> WarningSink<'a> {
    fn push(&mut self, field: &str, kind: WarningKind) {
        self.warnings.push(ValidationWarning {
            origin: self.origin.clone(),
            field: field.to_string(),
            kind,
        });
    }

    fn recommend(&mut self, field: &str, value: &Option<String>) {
        if value.is_none() {
            self.push(field, WarningKind::MissingRecommended);
        }
    }

    fn rating(&mut self, field: &str, value: Option<i64>) -> Option<u8> {
        match value {
            Some(v) if (RATING_MIN..=RATING_MAX).contains(&v) => u8::try_from(v).ok(),
            Some(v) => {
                self.push(field, WarningKind::RatingOutOfRange { value: v });
                None
            }
            None => None,
        }
    }
}

impl RecordValidator for ExitValidator {
    fn validate(&self, draft: ExitDraft) -> Result<ValidatedExit, ValidationRejection> {
        let mut reasons = Vec::new();

        let full_name = self.cleaner.normalize_null(draft.full_name.clone());
        if full_name.is_none() {
            reasons.push(RejectionReason::MissingName);
        }

        if draft.exit_type.is_none() {
            reasons.push(RejectionReason::UnknownExitType {
                raw: draft.type_label.clone().unwrap_or_default(),
            });
        }

        let exit_date = match &draft.exit_date {
            None => {
                reasons.push(RejectionReason::MissingExitDate);
                None
            }
            Some(Err(e)) => {
                reasons.push(RejectionReason::InvalidExitDate { raw: e.raw.clone() });
                None
            }
            Some(Ok(date)) => Some(*date),
        };

        let admission_date = match &draft.admission_date {
            Some(Err(e)) => {
                reasons.push(RejectionReason::InvalidAdmissionDate { raw: e.raw.clone() });
                None
            }
            Some(Ok(date)) => Some(*date),
            None => None,
        };

        // 两个日期都有效时以日期对为准，否则沿用草稿中的文本描述结果
        let tenure_days = match (admission_date, exit_date) {
            (Some(admission), Some(exit)) => match TenureResolver::from_dates(admission, exit) {
                Ok(days) => Some(days),
                Err(_) => {
                    reasons.push(RejectionReason::ExitBeforeAdmission);
                    None
                }
            },
            _ => match &draft.tenure_days {
                Some(Ok(days)) if *days > 0 => Some(*days),
                _ => None,
            },
        };

        let (Some(full_name), Some(exit_type), Some(exit_date), true) =
            (full_name, draft.exit_type, exit_date, reasons.is_empty())
        else {
            return Err(ValidationRejection {
                origin: draft.origin,
                full_name: self.cleaner.normalize_null(draft.full_name),
                reasons,
            });
        };

        let mut sink = WarningSink {
            origin: &draft.origin,
            warnings: Vec::new(),
        };

        let details = match exit_type {
            ExitType::Voluntary => {
                let department = self.cleaner.normalize_null(draft.department);
                let job_title = self.cleaner.normalize_null(draft.job_title);
                sink.recommend("department", &department);
                sink.recommend("job_title", &job_title);

                let prior_industry_experience =
                    match self.cleaner.normalize_null(draft.prior_industry_experience) {
                        Some(raw) => {
                            let flag = self.cleaner.parse_flag(&raw);
                            if flag.is_none() {
                                sink.push(
                                    "prior_industry_experience",
                                    WarningKind::UnrecognizedValue { value: raw },
                                );
                            }
                            flag
                        }
                        None => None,
                    };

                ExitDetails::Voluntary(VoluntaryDetails {
                    neighborhood: self.cleaner.normalize_null(draft.neighborhood),
                    job_title,
                    department,
                    reason: self.cleaner.normalize_null(draft.reason),
                    prior_industry_experience,
                    education_level: self.cleaner.normalize_null(draft.education_level),
                    commute: self.cleaner.normalize_null(draft.commute),
                    leadership_score: sink.rating("leadership_score", draft.leadership_score),
                    leadership_notes: self.cleaner.normalize_null(draft.leadership_notes),
                    hr_score: sink.rating("hr_score", draft.hr_score),
                    hr_notes: self.cleaner.normalize_null(draft.hr_notes),
                    company_score: sink.rating("company_score", draft.company_score),
                    company_notes: self.cleaner.normalize_null(draft.company_notes),
                    comments: self.cleaner.normalize_null(draft.comments),
                    filter_tag: self.cleaner.normalize_null(draft.filter_tag),
                })
            }
            ExitType::Company => {
                let shift = self.cleaner.normalize_null(draft.shift);
                sink.recommend("shift", &shift);

                ExitDetails::Company(CompanyDetails {
                    shift,
                    reason: self.cleaner.normalize_null(draft.reason),
                })
            }
        };

        let warnings = sink.warnings;
        let data = ExitData {
            full_name,
            admission_date,
            exit_date,
            tenure_days,
            sex: self.cleaner.normalize_null(draft.sex),
            manager: self.cleaner.normalize_null(draft.manager),
            age: draft
                .age
                .filter(|age| *age > 0)
                .and_then(|age| u32::try_from(age).ok()),
            details,
        };

        Ok(ValidatedExit {
            origin: draft.origin,
            data,
            warnings,
        })
    }
}
