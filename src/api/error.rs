// ==========================================
// 员工离职管理 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将各层错误转换为用户可读的错误
// ==========================================

use crate::domain::import::ValidationRejection;
use crate::engine::filter::FilterInputError;
use crate::importer::error::ImportError;
use crate::insights::SummarizerError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 人工登记/编辑未通过校验（携带全部原因）
    #[error("记录校验失败: {0}")]
    ValidationRejected(ValidationRejection),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error(transparent)]
    Import(#[from] ImportError),

    // ==========================================
    // 洞察错误
    // ==========================================
    #[error("没有主动离职数据可用于生成洞察")]
    NoVoluntaryData,

    #[error("洞察生成失败: {0}")]
    Summarizer(#[from] SummarizerError),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    #[error("配置读取失败: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 用户提示（当前语言）
    pub fn user_message(&self) -> String {
        use crate::i18n::t;
        match self {
            ApiError::Import(e) => e.user_message(),
            ApiError::ValidationRejected(rejection) => rejection
                .reasons
                .iter()
                .map(|r| r.message())
                .collect::<Vec<_>>()
                .join("; "),
            ApiError::NoVoluntaryData => t("insights.no_data"),
            other => other.to_string(),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::DatabaseError(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::SerializationError { field, message } => {
                ApiError::InternalError(format!("字段{}序列化失败: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 FilterInputError 转换
// ==========================================
impl From<FilterInputError> for ApiError {
    fn from(err: FilterInputError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_conversion() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "ExitRecord".to_string(),
            id: "abc".to_string(),
        }
        .into();

        assert!(matches!(err, ApiError::NotFound(ref msg) if msg.contains("abc")));
    }

    #[test]
    fn test_filter_error_is_invalid_input() {
        let err: ApiError = FilterInputError::MonthOutOfRange(12).into();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_import_error_keeps_variant() {
        let err: ApiError = ImportError::NoValidRows { rejected: vec![] }.into();
        assert!(matches!(err, ApiError::Import(ImportError::NoValidRows { .. })));
    }
}
