// ==========================================
// 员工离职管理 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// 规则: 缺失或格式错误的配置回退到默认值（并告警）
// ==========================================

use crate::config::turnover_config_trait::{ConfigResult, TurnoverConfigReader};
use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::types::DateOrder;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        crate::db::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 会对传入连接再次应用统一 PRAGMA（幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(config_key = key, value, "配置已更新");
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// 读取并解析配置；缺失返回默认值，解析失败或不满足约束时告警并返回默认值
    fn get_parsed_or_default<T>(
        &self,
        key: &str,
        default: T,
        valid: impl Fn(&T) -> bool,
    ) -> ConfigResult<T>
    where
        T: FromStr + Copy,
    {
        let Some(raw) = self.get_config_value(key)? else {
            return Ok(default);
        };

        match raw.trim().parse::<T>() {
            Ok(value) if valid(&value) => Ok(value),
            _ => {
                tracing::warn!(config_key = key, raw_value = %raw, "配置格式错误，使用默认值");
                Ok(default)
            }
        }
    }
}

#[async_trait]
impl TurnoverConfigReader for ConfigManager {
    async fn get_reason_top_n(&self) -> ConfigResult<usize> {
        self.get_parsed_or_default(config_keys::REASON_TOP_N, defaults::REASON_TOP_N, |v| *v > 0)
    }

    async fn get_recent_exits_limit(&self) -> ConfigResult<usize> {
        self.get_parsed_or_default(
            config_keys::RECENT_EXITS_LIMIT,
            defaults::RECENT_EXITS_LIMIT,
            |v| *v > 0,
        )
    }

    async fn get_rolling_window_months(&self) -> ConfigResult<u32> {
        self.get_parsed_or_default(
            config_keys::ROLLING_WINDOW_MONTHS,
            defaults::ROLLING_WINDOW_MONTHS,
            |v| (1..=120).contains(v),
        )
    }

    async fn get_days_per_month(&self) -> ConfigResult<i64> {
        self.get_parsed_or_default(
            config_keys::DAYS_PER_MONTH,
            defaults::DAYS_PER_MONTH,
            |v| *v > 0,
        )
    }

    async fn get_date_order(&self) -> ConfigResult<DateOrder> {
        self.get_parsed_or_default(config_keys::DATE_ORDER, DateOrder::default(), |_| true)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 驾驶舱
    pub const REASON_TOP_N: &str = "dashboard.reason_top_n";
    pub const RECENT_EXITS_LIMIT: &str = "dashboard.recent_exits_limit";
    pub const ROLLING_WINDOW_MONTHS: &str = "dashboard.rolling_window_months";
    pub const DAYS_PER_MONTH: &str = "dashboard.days_per_month";

    // 导入
    pub const DATE_ORDER: &str = "import.date_order";
}

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const REASON_TOP_N: usize = 7;
    pub const RECENT_EXITS_LIMIT: usize = 5;
    pub const ROLLING_WINDOW_MONTHS: u32 = 6;
    pub const DAYS_PER_MONTH: i64 = 30;
}
