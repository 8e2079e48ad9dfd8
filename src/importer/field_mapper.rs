// ==========================================
// 员工离职管理 - 字段映射器实现
// ==========================================
// 职责: 原始表头 → 标准字段（别名表）+ 日期/司龄/评分类型转换
// 约束: 表中没有的列保持 None；有列但为空 → Some("")，由校验器区分
// 约束: 评分只做整数转换，不做范围截断（范围属于校验职责）
// ==========================================

use crate::domain::exit::ExitForm;
use crate::domain::import::{CellValue, ExitDraft, RawRow};
use crate::domain::types::{DateOrder, ExitType};
use crate::i18n::{t_for, SUPPORTED_LOCALES};
use crate::importer::data_cleaner::{fold_key, DataCleaner};
use crate::importer::date_normalizer::DateNormalizer;
use crate::importer::error::DateParseError;
use crate::importer::exit_importer_trait::{DataCleaner as _, RowNormalizer};
use crate::importer::tenure_resolver::TenureResolver;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::trace;

// ==========================================
// 标准字段与别名表
// ==========================================
// 别名均为规范化后的表头（小写、无空白、无重音），按顺序取第一个非空值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    AdmissionDate,
    ExitDate,
    TenureDescriptor,
    Sex,
    Manager,
    Age,
    ExitType,
    Neighborhood,
    JobTitle,
    Department,
    VoluntaryReason,
    PriorIndustryExperience,
    EducationLevel,
    Commute,
    LeadershipScore,
    LeadershipNotes,
    HrScore,
    HrNotes,
    CompanyScore,
    CompanyNotes,
    Comments,
    FilterTag,
    Shift,
    CompanyReason,
}

impl Field {
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::FullName => &["nomecompleto", "nome", "colaborador"],
            Field::AdmissionDate => &["dataadmissao", "datadeadmissao", "admissao"],
            Field::ExitDate => &[
                "datadesligamento",
                "datadedesligamento",
                "desligamento",
                "datasaida",
                "datadesaida",
            ],
            Field::TenureDescriptor => &["tempodeempresa", "tempoempresa", "tempodecasa"],
            Field::Sex => &["sexo"],
            Field::Manager => &["lider", "gestor"],
            Field::Age => &["idade"],
            Field::ExitType => &["tipo", "tipodesligamento"],
            Field::Neighborhood => &["bairro"],
            Field::JobTitle => &["cargo", "funcao"],
            Field::Department => &["setor", "departamento"],
            Field::VoluntaryReason => &["motivo", "motivodesligamento"],
            Field::PriorIndustryExperience => &["trabalhouemindustria", "experienciaindustria"],
            Field::EducationLevel => &["nivelescolar", "escolaridade"],
            Field::Commute => &["deslocamento"],
            Field::LeadershipScore => &["notalideranca"],
            Field::LeadershipNotes => &["obslideranca"],
            Field::HrScore => &["notarh"],
            Field::HrNotes => &["obsrh"],
            Field::CompanyScore => &["notaempresa"],
            Field::CompanyNotes => &["obsempresa"],
            Field::Comments => &["comentarios", "observacoes"],
            Field::FilterTag => &["filtro"],
            Field::Shift => &["turno"],
            // 公司辞退表优先读取“desligamento”专用列
            Field::CompanyReason => &["motivodesligamento", "motivo"],
        }
    }
}

/// 类型列取值 → 离职类型
///
/// 按折叠后比较: 存储编码、常用简写，以及任一支持语言下的展示名称
pub fn parse_exit_type(raw: &str) -> Option<ExitType> {
    let folded = fold_key(raw);
    match folded.as_str() {
        "pedidodemissao" | "pedido" | "voluntario" | "voluntary" => {
            return Some(ExitType::Voluntary)
        }
        "demissaoempresa" | "empresa" | "company" => return Some(ExitType::Company),
        "" => return None,
        _ => {}
    }

    ExitType::ALL.into_iter().find(|exit_type| {
        SUPPORTED_LOCALES.iter().any(|locale| {
            [exit_type.label_key(), exit_type.short_label_key()]
                .iter()
                .any(|key| fold_key(&t_for(locale, key)) == folded)
        })
    })
}

// ==========================================
// FieldMapper
// ==========================================
pub struct FieldMapper {
    cleaner: DataCleaner,
    dates: DateNormalizer,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(DateOrder::default())
    }
}

/// 表头已规范化的行
struct CanonicalRow<'a> {
    cells: HashMap<String, &'a CellValue>,
}

impl<'a> CanonicalRow<'a> {
    /// 第一个非空别名的单元格；所有别名都为空时返回第一个存在的
    fn cell(&self, field: Field) -> Option<&'a CellValue> {
        let mut present = None;
        for alias in field.aliases() {
            if let Some(cell) = self.cells.get(*alias) {
                if !cell.is_blank() {
                    return Some(*cell);
                }
                present.get_or_insert(*cell);
            }
        }
        present
    }

    fn text(&self, field: Field) -> Option<String> {
        self.cell(field)
            .map(|cell| cell.as_text().unwrap_or_default())
    }

    fn integer(&self, field: Field) -> Option<i64> {
        self.cell(field).and_then(coerce_integer)
    }
}

fn coerce_integer(cell: &CellValue) -> Option<i64> {
    let value = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok()?,
        CellValue::Empty | CellValue::Bool(_) => return None,
    };
    if value.is_finite() {
        Some(value.round() as i64)
    } else {
        None
    }
}

impl FieldMapper {
    pub fn new(order: DateOrder) -> Self {
        Self {
            cleaner: DataCleaner,
            dates: DateNormalizer::new(order),
        }
    }

    fn canonicalize<'a>(&self, row: &'a RawRow) -> CanonicalRow<'a> {
        let mut cells = HashMap::with_capacity(row.cells.len());
        for (header, value) in &row.cells {
            let key = self.cleaner.normalize_header(header);
            // 规范化后重名: 按列顺序取第一个非空值
            let keep_existing = cells
                .get(&key)
                .map_or(false, |existing: &&CellValue| !existing.is_blank());
            if !keep_existing {
                cells.insert(key, value);
            }
        }
        CanonicalRow { cells }
    }

    fn fill_voluntary(&self, row: &CanonicalRow<'_>, draft: &mut ExitDraft) {
        draft.neighborhood = row.text(Field::Neighborhood);
        draft.job_title = row.text(Field::JobTitle);
        draft.department = row.text(Field::Department);
        draft.reason = row.text(Field::VoluntaryReason);
        draft.prior_industry_experience = row.text(Field::PriorIndustryExperience);
        draft.education_level = row.text(Field::EducationLevel);
        draft.commute = row.text(Field::Commute);
        draft.leadership_score = row.integer(Field::LeadershipScore);
        draft.leadership_notes = row.text(Field::LeadershipNotes);
        draft.hr_score = row.integer(Field::HrScore);
        draft.hr_notes = row.text(Field::HrNotes);
        draft.company_score = row.integer(Field::CompanyScore);
        draft.company_notes = row.text(Field::CompanyNotes);
        draft.comments = row.text(Field::Comments);
        draft.filter_tag = row.text(Field::FilterTag);
    }

    fn fill_company(&self, row: &CanonicalRow<'_>, draft: &mut ExitDraft) {
        draft.shift = row.text(Field::Shift);
        draft.reason = row.text(Field::CompanyReason);
    }

    /// 单元格 → 日期；空单元格视为缺失
    fn date(&self, cell: Option<&CellValue>) -> Option<Result<NaiveDate, DateParseError>> {
        cell.filter(|c| !c.is_blank()).map(|c| self.dates.normalize(c))
    }
}

impl RowNormalizer for FieldMapper {
    fn normalize_row(&self, row: &RawRow) -> ExitDraft {
        let canonical = self.canonicalize(row);

        let mut draft = ExitDraft {
            origin: row.origin.clone(),
            ..Default::default()
        };

        // 类型: 工作表提示优先，否则读 tipo 列
        let type_label = canonical
            .text(Field::ExitType)
            .filter(|label| !label.is_empty());
        draft.exit_type = row
            .type_hint
            .or_else(|| type_label.as_deref().and_then(parse_exit_type));
        draft.type_label = type_label;

        // 共有字段
        draft.full_name = canonical.text(Field::FullName);
        draft.admission_date = self.date(canonical.cell(Field::AdmissionDate));
        draft.exit_date = self.date(canonical.cell(Field::ExitDate));
        draft.sex = canonical.text(Field::Sex);
        draft.manager = canonical.text(Field::Manager);
        draft.age = canonical.integer(Field::Age);

        // 司龄: 两个日期均有效时走日期对，否则读文本描述
        let admission = draft.admission_date.clone().and_then(Result::ok);
        let exit = draft.exit_date.clone().and_then(Result::ok);
        let descriptor = canonical.text(Field::TenureDescriptor);
        draft.tenure_days =
            TenureResolver::resolve(admission, exit, descriptor.as_deref()).transpose();

        match draft.exit_type {
            Some(ExitType::Voluntary) => self.fill_voluntary(&canonical, &mut draft),
            Some(ExitType::Company) => self.fill_company(&canonical, &mut draft),
            None => {}
        }

        trace!(
            sheet = ?row.origin.sheet,
            row = row.origin.row_number,
            exit_type = ?draft.exit_type,
            "行规范化完成"
        );
        draft
    }

    fn normalize_form(&self, form: &ExitForm) -> ExitDraft {
        let admission_date = form
            .admission_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| self.dates.normalize_str(s));
        let exit_date = Some(form.exit_date.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(|s| self.dates.normalize_str(s));

        let admission = admission_date.clone().and_then(Result::ok);
        let exit = exit_date.clone().and_then(Result::ok);
        let tenure_days = TenureResolver::resolve(admission, exit, None).transpose();

        let mut draft = ExitDraft {
            exit_type: Some(form.exit_type),
            type_label: Some(form.exit_type.code().to_string()),
            full_name: Some(form.full_name.clone()),
            admission_date,
            exit_date,
            tenure_days,
            sex: form.sex.clone(),
            manager: form.manager.clone(),
            age: form.age.map(i64::from),
            ..Default::default()
        };

        match form.exit_type {
            ExitType::Voluntary => {
                draft.neighborhood = form.neighborhood.clone();
                draft.job_title = form.job_title.clone();
                draft.department = form.department.clone();
                draft.reason = form.reason.clone();
                draft.prior_industry_experience =
                    form.prior_industry_experience.map(|flag| flag.to_string());
                draft.education_level = form.education_level.clone();
                draft.commute = form.commute.clone();
                draft.leadership_score = form.leadership_score;
                draft.leadership_notes = form.leadership_notes.clone();
                draft.hr_score = form.hr_score;
                draft.hr_notes = form.hr_notes.clone();
                draft.company_score = form.company_score;
                draft.company_notes = form.company_notes.clone();
                draft.comments = form.comments.clone();
                draft.filter_tag = form.filter_tag.clone();
            }
            ExitType::Company => {
                draft.shift = form.shift.clone();
                draft.reason = form.reason.clone();
            }
        }

        draft
    }
}
