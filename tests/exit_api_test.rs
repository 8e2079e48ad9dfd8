// ==========================================
// ExitApi 集成测试
// ==========================================
// 测试目标: 人工登记 / 编辑 / 删除 / 清空
// ==========================================


use turnover_tracker::api::{ApiError, ExitApi};
use turnover_tracker::config::{config_keys, ConfigManager};
use turnover_tracker::domain::exit::{ExitDetails, ExitForm};
use turnover_tracker::domain::import::RejectionReason;
use turnover_tracker::domain::types::ExitType;
use test_helpers::{create_store_and_config, create_test_db, date};

fn voluntary_form(name: &str) -> ExitForm {
    ExitForm {
        exit_type: ExitType::Voluntary,
        full_name: name.to_string(),
        admission_date: Some("10/01/2022".to_string()),
        exit_date: "10/01/2024".to_string(),
        department: Some("Expedição".to_string()),
        job_title: Some("Auxiliar".to_string()),
        reason: Some("Salário".to_string()),
        leadership_score: Some(8),
        hr_score: Some(15),
        ..Default::default()
    }
}

fn setup() -> (tempfile::NamedTempFile, ExitApi, std::sync::Arc<ConfigManager>) {
    let (temp, db_path) = create_test_db().unwrap();
    let (store, config) = create_store_and_config(&db_path).unwrap();
    let api = ExitApi::new(store, config.clone());
    (temp, api, config)
}

#[tokio::test]
async fn test_register_exit_derives_tenure() {
    let (_temp, api, _config) = setup();

    let id = api.register_exit(voluntary_form("Ana Silva")).await.unwrap();
    let record = api.get_exit(&id).await.unwrap();

    assert_eq!(record.data.admission_date, Some(date(2022, 1, 10)));
    assert_eq!(record.data.exit_date, date(2024, 1, 10));
    assert_eq!(record.data.tenure_days, Some(730));
    match &record.data.details {
        ExitDetails::Voluntary(details) => {
            assert_eq!(details.leadership_score, Some(8));
            // 越界评分被置空
            assert_eq!(details.hr_score, None);
        }
        other => panic!("unexpected details: {:?}", other),
    }
}

#[tokio::test]
async fn test_register_exit_rejects_invalid_form() {
    let (_temp, api, _config) = setup();

    let mut form = voluntary_form("");
    form.admission_date = Some("10/02/2024".to_string());

    let err = api.register_exit(form).await.unwrap_err();
    match err {
        ApiError::ValidationRejected(rejection) => {
            assert!(rejection.has_reason(&RejectionReason::MissingName));
            assert!(rejection.has_reason(&RejectionReason::ExitBeforeAdmission));
        }
        other => panic!("expected ValidationRejected, got {:?}", other),
    }
    assert!(api.list_exits(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_exit_honours_configured_date_order() {
    let (_temp, api, config) = setup();
    config
        .set_global_config_value(config_keys::DATE_ORDER, "MDY")
        .unwrap();

    let mut form = voluntary_form("Bruno Lima");
    form.admission_date = None;
    form.exit_date = "03/04/2024".to_string();

    let id = api.register_exit(form).await.unwrap();
    assert_eq!(api.get_exit(&id).await.unwrap().data.exit_date, date(2024, 3, 4));
}

#[tokio::test]
async fn test_update_exit_preserves_identity_and_recomputes_tenure() {
    let (_temp, api, _config) = setup();
    let id = api.register_exit(voluntary_form("Carla Souza")).await.unwrap();
    let before = api.get_exit(&id).await.unwrap();

    let form = ExitForm {
        exit_type: ExitType::Company,
        full_name: "Carla Souza".to_string(),
        admission_date: Some("2023-01-01".to_string()),
        exit_date: "2023-01-31".to_string(),
        shift: Some("Tarde".to_string()),
        reason: Some("Reestruturação".to_string()),
        ..Default::default()
    };
    let updated = api.update_exit(&id, form).await.unwrap();

    assert_eq!(updated.id, before.id);
    assert_eq!(updated.created_at, before.created_at);
    assert_eq!(updated.exit_type(), ExitType::Company);
    assert_eq!(updated.data.tenure_days, Some(30));
    assert_eq!(updated.data.department(), None);
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let (_temp, api, _config) = setup();

    let err = api
        .update_exit("missing-id", voluntary_form("Ana"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_and_clear() {
    let (_temp, api, _config) = setup();

    let first = api.register_exit(voluntary_form("Ana")).await.unwrap();
    api.register_exit(voluntary_form("Bia")).await.unwrap();

    api.delete_exit(&first).await.unwrap();
    assert!(matches!(
        api.delete_exit(&first).await.unwrap_err(),
        ApiError::NotFound(_)
    ));
    assert!(matches!(
        api.get_exit(&first).await.unwrap_err(),
        ApiError::NotFound(_)
    ));

    let outcome = api.clear_all().await.unwrap();
    assert_eq!(outcome.deleted, 1);
    assert!(!outcome.already_empty);

    let again = api.clear_all().await.unwrap();
    assert_eq!(again.deleted, 0);
    assert!(again.already_empty);
}
