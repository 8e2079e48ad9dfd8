// ==========================================
// 员工离职管理 - 离职记录存储 Trait
// ==========================================
// 职责: 定义离职记录存储契约（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据 CRUD
// 约束: 查询只支持按类型等值过滤 + 按已知字段排序
// ==========================================

use crate::domain::exit::{ExitData, ExitRecord};
use crate::domain::types::ExitType;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

/// 查询排序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitOrder {
    /// 离职日期降序（同日按创建顺序）
    #[default]
    ExitDateDesc,
    ExitDateAsc,
    CreatedAtAsc,
}

/// 查询条件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExitQuery {
    pub exit_type: Option<ExitType>,
    pub order: ExitOrder,
}

impl ExitQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of_type(exit_type: ExitType) -> Self {
        Self {
            exit_type: Some(exit_type),
            ..Self::default()
        }
    }
}

// ==========================================
// ExitStore Trait
// ==========================================
// 实现者: SqliteExitStore（rusqlite）
#[async_trait]
pub trait ExitStore: Send + Sync {
    /// 查询离职记录
    async fn query(&self, query: ExitQuery) -> RepositoryResult<Vec<ExitRecord>>;

    /// 新增单条记录
    ///
    /// # 返回
    /// - Ok(String): 存储层分配的 id
    async fn add_one(&self, data: ExitData) -> RepositoryResult<String>;

    /// 批量写入（全部成功或全部失败）
    ///
    /// # 返回
    /// - Ok(Vec<String>): 按输入顺序分配的 id
    /// - Err: 整批回滚
    async fn batch_write(&self, records: Vec<ExitData>) -> RepositoryResult<Vec<String>>;

    /// 清空全部记录（单事务）
    ///
    /// # 返回
    /// - Ok(usize): 删除的记录数
    async fn delete_all(&self) -> RepositoryResult<usize>;

    /// 按 id 查询
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<ExitRecord>>;

    /// 替换全部可变字段（保留 id / created_at）
    ///
    /// # 返回
    /// - Err(NotFound): id 不存在
    async fn replace_one(&self, id: &str, data: ExitData) -> RepositoryResult<ExitRecord>;

    /// 删除单条记录
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Ok(false): id 不存在
    async fn delete_one(&self, id: &str) -> RepositoryResult<bool>;
}
