// ==========================================
// 员工离职管理 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{DashboardApi, ExitApi, ImportApi, InsightsApi};
use crate::config::{ConfigManager, TurnoverConfigReader};
use crate::db::{init_schema, open_sqlite_connection};
use crate::insights::ExitSummarizer;
use crate::repository::{ExitStore, SqliteExitStore};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "TURNOVER_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源（单一共享连接）
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 离职记录存储
    pub store: Arc<dyn ExitStore>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 离职记录API
    pub exit_api: Arc<ExitApi>,

    /// 导入API
    pub import_api: Arc<ImportApi>,

    /// 驾驶舱API
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并建表（幂等）
    /// 2. 创建所有API实例
    ///
    /// 语言由入口程序设置（i18n::set_locale）
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("数据库初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository / Config
        // ==========================================
        let store: Arc<dyn ExitStore> = Arc::new(SqliteExitStore::from_connection(conn.clone()));
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let config_reader: Arc<dyn TurnoverConfigReader> = config_manager.clone();

        // ==========================================
        // 初始化API层
        // ==========================================
        let exit_api = Arc::new(ExitApi::new(store.clone(), config_reader.clone()));
        let import_api = Arc::new(ImportApi::new(store.clone(), config_reader.clone()));
        let dashboard_api = Arc::new(DashboardApi::new(store.clone(), config_reader));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            store,
            config_manager,
            exit_api,
            import_api,
            dashboard_api,
        })
    }

    /// 基于外部摘要服务构建洞察API
    pub fn insights_api(&self, summarizer: Arc<dyn ExitSummarizer>) -> InsightsApi {
        InsightsApi::new(self.store.clone(), summarizer)
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 TURNOVER_DB_PATH → 用户数据目录 → ./turnover.db
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./turnover.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("turnover-tracker");
        // 目录创建失败时保留当前目录回退值
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("turnover.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_app_state_initializes_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("state.db").to_string_lossy().to_string();

        let state = AppState::new(db_path.clone()).unwrap();
        assert_eq!(state.db_path, db_path);
        assert!(dir.path().join("state.db").exists());
    }

    #[test]
    fn test_default_db_path_is_not_empty() {
        assert!(!get_default_db_path().is_empty());
    }
}
