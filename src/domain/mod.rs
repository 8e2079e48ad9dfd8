// ==========================================
// 员工离职管理 - 领域模型层
// ==========================================
// 职责: 定义离职记录、导入中间结构、驾驶舱结果
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod dashboard;
pub mod exit;
pub mod import;
pub mod types;

// 重导出核心类型
pub use dashboard::{
    AggregationResult, BreakdownEntry, MonthlyExitView, MonthlySlot, RecentExitView, TypeBucket,
    TypeDistribution,
};
pub use exit::{CompanyDetails, ExitData, ExitDetails, ExitForm, ExitRecord, VoluntaryDetails};
pub use import::{
    BatchValidation, CellValue, ExitDraft, ImportReport, RawRow, RejectionReason, RowOrigin,
    ValidatedExit, ValidationRejection, ValidationWarning, WarningKind,
};
pub use types::{DateOrder, ExitType};
