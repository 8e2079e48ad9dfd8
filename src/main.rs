// ==========================================
// 员工离职管理 - 命令行入口
// ==========================================
// 用法:
//   turnover-tracker [db_path] import <file>
//   turnover-tracker [db_path] dashboard [year] [month0]
//   turnover-tracker [db_path] month <month0> [year]
//   turnover-tracker [db_path] clear
// 输出: JSON（stdout）；日志写 stderr
// ==========================================

use serde::Serialize;
use serde_json::Value;
use turnover_tracker::api::ApiError;
use turnover_tracker::app::{get_default_db_path, AppState};
use turnover_tracker::i18n::{set_locale, DEFAULT_LOCALE};
use turnover_tracker::logging;

const COMMANDS: [&str; 4] = ["import", "dashboard", "month", "clear"];

const USAGE: &str = "用法: turnover-tracker [db_path] <import <file> | dashboard [year] [month0] | month <month0> [year] | clear>";

/// 解析可选整数参数
fn parse_opt_int(arg: Option<&String>, name: &str) -> Result<Option<i64>, String> {
    match arg {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("参数 {} 不是整数: {}", name, raw)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    set_locale(DEFAULT_LOCALE);

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    // 第一个参数不是命令时视为数据库路径
    let db_path = match args.first() {
        Some(first) if !COMMANDS.contains(&first.as_str()) => args.remove(0),
        _ => get_default_db_path(),
    };

    let Some(command) = args.first().cloned() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    let rest = &args[1..];

    tracing::info!("turnover-tracker {} | db={}", turnover_tracker::VERSION, db_path);
    let state = AppState::new(db_path)?;

    let output = match command.as_str() {
        "import" => {
            let file = rest.first().ok_or(USAGE)?;
            state
                .import_api
                .import_exits(file)
                .await
                .and_then(to_json)
        }
        "dashboard" => {
            let year = parse_opt_int(rest.first(), "year")?;
            let month = parse_opt_int(rest.get(1), "month0")?;
            state
                .dashboard_api
                .get_dashboard_data(year, month)
                .await
                .and_then(to_json)
        }
        "month" => {
            let month = parse_opt_int(rest.first(), "month0")?.ok_or(USAGE)?;
            let year = parse_opt_int(rest.get(1), "year")?;
            state
                .dashboard_api
                .list_exits_in_month(year, month)
                .await
                .and_then(to_json)
        }
        "clear" => state
            .exit_api
            .clear_all()
            .await
            .and_then(to_json),
        other => {
            eprintln!("未知命令: {}\n{}", other, USAGE);
            std::process::exit(2);
        }
    };

    match output {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(err) => {
            report_error(&err);
            std::process::exit(1);
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::InternalError(format!("JSON 序列化失败: {}", e)))
}

fn report_error(err: &ApiError) {
    tracing::error!(error = %err, "命令执行失败");
    eprintln!("{}", err.user_message());
}
