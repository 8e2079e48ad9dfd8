// ==========================================
// 员工离职管理 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析 → RawRow
// 支持: Excel (.xlsx/.xls，按工作表区分类型) / CSV (.csv，按 tipo 列区分类型)
// ==========================================

use crate::domain::import::{CellValue, RawRow, RowOrigin};
use crate::domain::types::ExitType;
use crate::importer::data_cleaner::fold_key;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::exit_importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// 工作表名（折叠后）→ 离职类型
pub const VOLUNTARY_SHEET: &str = "pedidodemissao";
pub const COMPANY_SHEET: &str = "demissaoempresa";

/// 按工作表名识别离职类型
pub fn classify_sheet(name: &str) -> Option<ExitType> {
    match fold_key(name).as_str() {
        VOLUNTARY_SHEET => Some(ExitType::Voluntary),
        COMPANY_SHEET => Some(ExitType::Company),
        _ => None,
    }
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
// 单表: 每行的类型由 tipo 列决定（type_hint = None）
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension(file_path);
        if !ext.is_empty() && ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut cells = Vec::with_capacity(headers.len());

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    let cell = if value.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::text(value.trim())
                    };
                    cells.push((header.clone(), cell));
                }
            }

            let row = RawRow {
                origin: RowOrigin {
                    sheet: None,
                    row_number: idx + 2, // 表头为第 1 行
                },
                type_hint: None,
                cells,
            };

            // 跳过完全空白的行
            if !row.is_blank() {
                rows.push(row);
            }
        }

        debug!(path = %file_path.display(), rows = rows.len(), "CSV 解析完成");
        Ok(rows)
    }
}

// ==========================================
// Workbook Parser 实现
// ==========================================
// 只读取两个可识别的工作表；其余工作表忽略
pub struct WorkbookParser;

impl WorkbookParser {
    /// 工作表名 → (名称, 类型)，一个都不认识时报错
    fn recognize_sheets(sheet_names: Vec<String>) -> ImportResult<Vec<(String, ExitType)>> {
        let recognized: Vec<(String, ExitType)> = sheet_names
            .iter()
            .filter_map(|name| classify_sheet(name).map(|t| (name.clone(), t)))
            .collect();

        if recognized.is_empty() {
            warn!(found = ?sheet_names, "工作簿中没有可识别的工作表");
            return Err(ImportError::NoRecognizedSheet { found: sheet_names });
        }
        Ok(recognized)
    }

    fn sheet_rows(sheet: &str, exit_type: ExitType, range: &Range<Data>) -> Vec<RawRow> {
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        let mut iter = range.rows();

        let Some(header_row) = iter.next() else {
            return Vec::new();
        };
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, data_row) in iter.enumerate() {
            let mut cells = Vec::with_capacity(headers.len());
            for (col_idx, cell) in data_row.iter().enumerate() {
                match headers.get(col_idx) {
                    Some(header) if !header.is_empty() => {
                        cells.push((header.clone(), to_cell_value(cell)));
                    }
                    _ => {}
                }
            }

            let row = RawRow {
                origin: RowOrigin {
                    sheet: Some(sheet.to_string()),
                    row_number: first_row + idx + 2,
                },
                type_hint: Some(exit_type),
                cells,
            };
            if !row.is_blank() {
                rows.push(row);
            }
        }
        rows
    }
}

impl FileParser for WorkbookParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;
        let recognized = Self::recognize_sheets(workbook.sheet_names())?;

        let mut rows = Vec::new();
        for (sheet, exit_type) in recognized {
            let range = workbook.worksheet_range(&sheet)?;
            let sheet_rows = Self::sheet_rows(&sheet, exit_type, &range);
            info!(sheet = %sheet, exit_type = %exit_type, rows = sheet_rows.len(), "读取工作表");
            rows.extend(sheet_rows);
        }

        Ok(rows)
    }
}

/// calamine 单元格 → CellValue（日期单元格按序列号传递）
pub fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        match extension(file_path).as_str() {
            "csv" => CsvParser.parse_rows(file_path),
            "xlsx" | "xls" => WorkbookParser.parse_rows(file_path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
