// ==========================================
// InsightsApi 集成测试
// ==========================================
// 测试目标: 仅主动离职记录进入摘要服务；无数据/服务失败的错误区分
// ==========================================


use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use turnover_tracker::api::{ApiError, InsightsApi};
use turnover_tracker::insights::{ExitSummarizer, SummarizerError, VoluntaryExitDigest};
use turnover_tracker::repository::ExitStore;
use test_helpers::{company, create_store_and_config, create_test_db, date, voluntary};

/// 记录调用输入的摘要服务
#[derive(Default)]
struct RecordingSummarizer {
    seen: Mutex<Vec<VoluntaryExitDigest>>,
}

#[async_trait]
impl ExitSummarizer for RecordingSummarizer {
    async fn summarize(&self, digests: &[VoluntaryExitDigest]) -> Result<String, SummarizerError> {
        self.seen.lock().unwrap().extend_from_slice(digests);
        Ok(format!("{} pedidos analisados", digests.len()))
    }
}

struct UnavailableSummarizer;

#[async_trait]
impl ExitSummarizer for UnavailableSummarizer {
    async fn summarize(&self, _digests: &[VoluntaryExitDigest]) -> Result<String, SummarizerError> {
        Err(SummarizerError::Unavailable("timeout".to_string()))
    }
}

#[tokio::test]
async fn test_generate_insights_uses_voluntary_only() {
    let (_temp, db_path) = create_test_db().unwrap();
    let (store, _config) = create_store_and_config(&db_path).unwrap();
    store
        .batch_write(vec![
            voluntary("Ana", date(2024, 1, 10), "Produção", "Salário"),
            company("Davi", date(2024, 3, 8), "Faltas"),
            voluntary("Bia", date(2024, 2, 1), "Logística", "Distância"),
        ])
        .await
        .unwrap();

    let summarizer = Arc::new(RecordingSummarizer::default());
    let api = InsightsApi::new(store, summarizer.clone());

    let text = api.generate_insights().await.unwrap();
    assert_eq!(text, "2 pedidos analisados");

    let seen = summarizer.seen.lock().unwrap();
    let mut names: Vec<&str> = seen.iter().map(|d| d.full_name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Ana", "Bia"]);
    assert!(seen.iter().all(|d| d.neighborhood == "N/A"));
}

#[tokio::test]
async fn test_generate_insights_without_voluntary_data() {
    let (_temp, db_path) = create_test_db().unwrap();
    let (store, _config) = create_store_and_config(&db_path).unwrap();
    store
        .add_one(company("Davi", date(2024, 3, 8), "Faltas"))
        .await
        .unwrap();

    let summarizer = Arc::new(RecordingSummarizer::default());
    let api = InsightsApi::new(store, summarizer.clone());

    let err = api.generate_insights().await.unwrap_err();
    assert!(matches!(err, ApiError::NoVoluntaryData));
    assert!(summarizer.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_insights_surfaces_summarizer_failure() {
    let (_temp, db_path) = create_test_db().unwrap();
    let (store, _config) = create_store_and_config(&db_path).unwrap();
    store
        .add_one(voluntary("Ana", date(2024, 1, 10), "Produção", "Salário"))
        .await
        .unwrap();

    let api = InsightsApi::new(store, Arc::new(UnavailableSummarizer));

    let err = api.generate_insights().await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Summarizer(SummarizerError::Unavailable(_))
    ));
}
