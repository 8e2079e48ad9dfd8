// ==========================================
// 员工离职管理 - 导入层
// ==========================================
// 职责: 外部表格 → 规范化离职记录
// 支持: Excel（两个工作表）, CSV（tipo 列）
// 管道: 日期规范化 / 司龄计算 → 行规范化 → 校验 → 批次落库
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod date_normalizer;
pub mod error;
pub mod exit_importer_impl;
pub mod exit_importer_trait;
pub mod field_mapper;
pub mod file_parser;
pub mod record_validator;
pub mod tenure_resolver;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use date_normalizer::DateNormalizer;
pub use error::{DateParseError, ImportCommitError, ImportError, ImportResult, NegativeTenureError};
pub use exit_importer_impl::ExitImporterImpl;
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, UniversalFileParser, WorkbookParser};
pub use record_validator::ExitValidator;
pub use tenure_resolver::TenureResolver;

// 重导出 Trait 接口
pub use exit_importer_trait::{DataCleaner, ExitImporter, FileParser, RecordValidator, RowNormalizer};
