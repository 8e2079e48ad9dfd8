// ==========================================
// 员工离职管理 - 离职洞察输入层
// ==========================================
// 职责: 将主动离职记录投影为摘要服务的输入，并定义摘要服务接口
// 红线: 不包含摘要生成逻辑（由外部服务实现）
// ==========================================

pub mod summarizer;

pub use summarizer::{ExitSummarizer, SummarizerError, VoluntaryExitDigest};
