// ==========================================
// 员工离职管理 - 离职记录存储实现（SQLite）
// ==========================================
// 表: exits（共有字段为列，变体字段存 details_json）
// id: UUID v4；created_at: RFC 3339（UTC）
// 读取时 exit_date 无法解析的行跳过并告警（不进入任何视图）
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::exit::{ExitData, ExitDetails, ExitRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::exit_store::{ExitOrder, ExitQuery, ExitStore};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

const SELECT_COLUMNS: &str = "id, full_name, admission_date, exit_date, tenure_days, \
     sex, manager, age, details_json, created_at";

/// 数据库原始行（未解析）
struct StoredRow {
    id: String,
    full_name: String,
    admission_date: Option<String>,
    exit_date: String,
    tenure_days: Option<i64>,
    sex: Option<String>,
    manager: Option<String>,
    age: Option<u32>,
    details_json: String,
    created_at: String,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            full_name: row.get(1)?,
            admission_date: row.get(2)?,
            exit_date: row.get(3)?,
            tenure_days: row.get(4)?,
            sex: row.get(5)?,
            manager: row.get(6)?,
            age: row.get(7)?,
            details_json: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    /// 解析为领域记录；关键字段无法解析时返回 None
    fn into_record(self) -> Option<ExitRecord> {
        let Ok(exit_date) = NaiveDate::parse_from_str(&self.exit_date, "%Y-%m-%d") else {
            warn!(id = %self.id, raw = %self.exit_date, "离职日期无法解析，跳过该记录");
            return None;
        };

        let created_at = match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(ts) => ts.with_timezone(&Utc),
            Err(e) => {
                warn!(id = %self.id, raw = %self.created_at, error = %e, "created_at 无法解析，跳过该记录");
                return None;
            }
        };

        let details: ExitDetails = match serde_json::from_str(&self.details_json) {
            Ok(details) => details,
            Err(e) => {
                warn!(id = %self.id, error = %e, "details_json 无法解析，跳过该记录");
                return None;
            }
        };

        let admission_date = self.admission_date.and_then(|raw| {
            let parsed = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok();
            if parsed.is_none() {
                warn!(id = %self.id, raw = %raw, "入职日期无法解析，按缺失处理");
            }
            parsed
        });

        Some(ExitRecord {
            id: self.id,
            created_at,
            data: ExitData {
                full_name: self.full_name,
                admission_date,
                exit_date,
                tenure_days: self.tenure_days,
                sex: self.sex,
                manager: self.manager,
                age: self.age,
                details,
            },
        })
    }
}

// ==========================================
// SqliteExitStore
// ==========================================
pub struct SqliteExitStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteExitStore {
    /// 打开数据库并建表
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例（调用方负责建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn insert(conn: &Connection, id: &str, created_at: &DateTime<Utc>, data: &ExitData) -> RepositoryResult<()> {
        let details_json = serde_json::to_string(&data.details)?;
        conn.execute(
            r#"
            INSERT INTO exits (
                id, exit_type, full_name, admission_date, exit_date, tenure_days,
                sex, manager, age, details_json, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                id,
                data.exit_type().code(),
                data.full_name,
                data.admission_date.map(|d| d.format("%Y-%m-%d").to_string()),
                data.exit_date.format("%Y-%m-%d").to_string(),
                data.tenure_days,
                data.sex,
                data.manager,
                data.age,
                details_json,
                created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn select_one(conn: &Connection, id: &str) -> RepositoryResult<Option<ExitRecord>> {
        let sql = format!("SELECT {} FROM exits WHERE id = ?1", SELECT_COLUMNS);
        let stored = conn
            .query_row(&sql, [id], StoredRow::from_row)
            .optional()?;
        Ok(stored.and_then(StoredRow::into_record))
    }
}

#[async_trait]
impl ExitStore for SqliteExitStore {
    async fn query(&self, query: ExitQuery) -> RepositoryResult<Vec<ExitRecord>> {
        let conn = self.get_conn()?;

        let order_by = match query.order {
            ExitOrder::ExitDateDesc => "exit_date DESC, created_at ASC, rowid ASC",
            ExitOrder::ExitDateAsc => "exit_date ASC, created_at ASC, rowid ASC",
            ExitOrder::CreatedAtAsc => "created_at ASC, rowid ASC",
        };

        let stored: Vec<StoredRow> = match query.exit_type {
            Some(exit_type) => {
                let sql = format!(
                    "SELECT {} FROM exits WHERE exit_type = ?1 ORDER BY {}",
                    SELECT_COLUMNS, order_by
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map([exit_type.code()], StoredRow::from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let sql = format!("SELECT {} FROM exits ORDER BY {}", SELECT_COLUMNS, order_by);
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map([], StoredRow::from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };

        let total = stored.len();
        let records: Vec<ExitRecord> = stored.into_iter().filter_map(StoredRow::into_record).collect();
        if records.len() < total {
            warn!(skipped = total - records.len(), "部分记录无法解析，已从结果中排除");
        }
        debug!(exit_type = ?query.exit_type, count = records.len(), "查询离职记录");
        Ok(records)
    }

    async fn add_one(&self, data: ExitData) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let id = Uuid::new_v4().to_string();
        Self::insert(&conn, &id, &Utc::now(), &data)?;
        debug!(id = %id, "新增离职记录");
        Ok(id)
    }

    async fn batch_write(&self, records: Vec<ExitData>) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let created_at = Utc::now();
        let mut ids = Vec::with_capacity(records.len());
        for data in &records {
            let id = Uuid::new_v4().to_string();
            Self::insert(&tx, &id, &created_at, data)?;
            ids.push(id);
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        info!(count = ids.len(), "批量写入离职记录");
        Ok(ids)
    }

    async fn delete_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        let deleted = tx.execute("DELETE FROM exits", [])?;
        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        info!(deleted, "清空离职记录");
        Ok(deleted)
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<ExitRecord>> {
        let conn = self.get_conn()?;
        Self::select_one(&conn, id)
    }

    async fn replace_one(&self, id: &str, data: ExitData) -> RepositoryResult<ExitRecord> {
        let conn = self.get_conn()?;
        let details_json = serde_json::to_string(&data.details)?;

        let updated = conn.execute(
            r#"
            UPDATE exits SET
                exit_type = ?2, full_name = ?3, admission_date = ?4, exit_date = ?5,
                tenure_days = ?6, sex = ?7, manager = ?8, age = ?9, details_json = ?10
            WHERE id = ?1
            "#,
            params![
                id,
                data.exit_type().code(),
                data.full_name,
                data.admission_date.map(|d| d.format("%Y-%m-%d").to_string()),
                data.exit_date.format("%Y-%m-%d").to_string(),
                data.tenure_days,
                data.sex,
                data.manager,
                data.age,
                details_json,
            ],
        )?;

        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ExitRecord".to_string(),
                id: id.to_string(),
            });
        }

        Self::select_one(&conn, id)?.ok_or_else(|| {
            RepositoryError::InternalError(format!("记录更新后无法读取: {}", id))
        })
    }

    async fn delete_one(&self, id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let deleted = conn.execute("DELETE FROM exits WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }
}
