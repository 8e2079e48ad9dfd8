// ==========================================
// DashboardApi 集成测试
// ==========================================
// 测试目标: 存储 → 过滤 → 聚合；月度下钻；参数校验
// ==========================================


use std::sync::Arc;
use turnover_tracker::api::{ApiError, DashboardApi};
use turnover_tracker::config::{config_keys, ConfigManager};
use turnover_tracker::repository::{ExitStore, SqliteExitStore};
use test_helpers::{company, create_store_and_config, create_test_db, date, voluntary};

async fn seeded() -> (
    tempfile::NamedTempFile,
    Arc<SqliteExitStore>,
    Arc<ConfigManager>,
    DashboardApi,
) {
    let (temp, db_path) = create_test_db().unwrap();
    let (store, config) = create_store_and_config(&db_path).unwrap();

    store
        .batch_write(vec![
            voluntary("Ana", date(2024, 1, 10), "Produção", "Salário"),
            voluntary("Bia", date(2024, 1, 20), "Produção", "Salário"),
            voluntary("Caio", date(2024, 3, 5), "Logística", "Distância"),
            company("Davi", date(2024, 3, 8), "Faltas"),
            company("Enzo", date(2023, 12, 30), "Faltas"),
        ])
        .await
        .unwrap();

    let api = DashboardApi::new(store.clone(), config.clone());
    (temp, store, config, api)
}

#[tokio::test]
async fn test_dashboard_year_filter_has_twelve_slots() {
    let (_temp, _store, _config, api) = seeded().await;

    let data = api
        .get_dashboard_data_at(Some(2024), None, date(2024, 6, 1))
        .await
        .unwrap();

    assert_eq!(data.total_exits, 4);
    assert_eq!(data.total_voluntary, 3);
    assert_eq!(data.total_company, 1);
    assert_eq!(data.total_exits, data.total_voluntary + data.total_company);

    assert_eq!(data.monthly_series.len(), 12);
    assert_eq!(data.monthly_series[0].voluntary, 2);
    assert_eq!(data.monthly_series[2].voluntary, 1);
    assert_eq!(data.monthly_series[2].company, 1);
    assert!(data.monthly_series.iter().all(|s| s.year == 2024));

    assert_eq!(data.by_sector[0].name, "Produção");
    assert_eq!(data.by_sector[0].value, 2);
    assert_eq!(data.by_reason[0].name, "Salário");
    assert_eq!(data.by_reason[0].value, 2);
    assert!(data.by_reason.iter().all(|e| e.name != "Faltas"));
    assert_eq!(data.recent_exits[0].name, "Davi");
    assert_eq!(data.type_distribution.voluntary.value, 3);
    assert_eq!(data.type_distribution.company.value, 1);
}

#[tokio::test]
async fn test_dashboard_without_filter_uses_rolling_window() {
    let (_temp, _store, _config, api) = seeded().await;

    let data = api
        .get_dashboard_data_at(None, None, date(2024, 3, 15))
        .await
        .unwrap();

    assert_eq!(data.total_exits, 5);
    assert_eq!(data.monthly_series.len(), 6);

    let last = data.monthly_series.last().unwrap();
    assert_eq!((last.year, last.month), (2024, 2));
    assert_eq!(last.total, 2);

    let december = &data.monthly_series[2];
    assert_eq!((december.year, december.month), (2023, 11));
    assert_eq!(december.company, 1);
}

#[tokio::test]
async fn test_dashboard_respects_configured_limits() {
    let (_temp, _store, config, api) = seeded().await;
    config
        .set_global_config_value(config_keys::RECENT_EXITS_LIMIT, "2")
        .unwrap();
    config
        .set_global_config_value(config_keys::REASON_TOP_N, "1")
        .unwrap();

    let data = api
        .get_dashboard_data_at(None, None, date(2024, 3, 15))
        .await
        .unwrap();

    assert_eq!(data.recent_exits.len(), 2);
    assert_eq!(data.by_reason.len(), 1);
}

#[tokio::test]
async fn test_dashboard_month_filter_across_years() {
    let (_temp, _store, _config, api) = seeded().await;

    let data = api
        .get_dashboard_data_at(None, Some(11), date(2024, 3, 15))
        .await
        .unwrap();

    assert_eq!(data.total_exits, 1);
    assert_eq!(data.total_company, 1);
}

#[tokio::test]
async fn test_dashboard_rejects_malformed_filter() {
    let (_temp, _store, _config, api) = seeded().await;

    let err = api
        .get_dashboard_data_at(Some(2024), Some(12), date(2024, 3, 15))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));

    let err = api.list_exits_in_month(Some(99999), 0).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[tokio::test]
async fn test_list_exits_in_month_newest_first() {
    let (_temp, _store, _config, api) = seeded().await;

    let rows = api.list_exits_in_month(Some(2024), 0).await.unwrap();

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Bia", "Ana"]);
    assert_eq!(rows[0].job_title.as_deref(), Some("Operador"));
}

#[tokio::test]
async fn test_empty_store_yields_zero_totals() {
    let (_temp, db_path) = create_test_db().unwrap();
    let (store, config) = create_store_and_config(&db_path).unwrap();
    let api = DashboardApi::new(store, config);

    let data = api
        .get_dashboard_data_at(Some(2024), None, date(2024, 3, 15))
        .await
        .unwrap();

    assert_eq!(data.total_exits, 0);
    assert_eq!(data.average_tenure_months, None);
    assert!(data.monthly_series.iter().all(|s| s.total == 0));
    assert!(data.by_reason.is_empty());
    assert!(data.recent_exits.is_empty());
}
