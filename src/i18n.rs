// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持葡萄牙语（默认）、英文和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 应用默认语言（CLI 启动时设置）
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// locales/ 下提供的全部语言
pub const SUPPORTED_LOCALES: &[&str] = &["pt-BR", "en", "zh-CN"];

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"pt-BR" / "en" / "zh-CN"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use turnover_tracker::i18n::t;
/// let msg = t("common.not_informed");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 按指定语言翻译（不修改全局语言）
pub fn t_for(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use turnover_tracker::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/saidas.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    fill_args(rust_i18n::t!(key).to_string(), args)
}

/// 按指定语言翻译（带参数）
pub fn t_for_with_args(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    fill_args(t_for(locale, key), args)
}

fn fill_args(mut result: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // 全局 locale 在并行测试间共享，这里只使用显式 locale 的接口

    #[test]
    fn test_translate_per_locale() {
        assert_eq!(t_for("pt-BR", "common.not_informed"), "Não informado");
        assert_eq!(t_for("pt-BR", "exit_type.voluntary"), "Pedido de Demissão");
        assert_eq!(t_for("pt-BR", "month.3"), "mar");
    }

    #[test]
    fn test_translate_with_args() {
        let msg = t_for_with_args("pt-BR", "import.file_not_found", &[("path", "/tmp/saidas.csv")]);
        assert!(msg.contains("/tmp/saidas.csv"));
        assert!(msg.contains("Arquivo não encontrado"));

        let msg = t_for_with_args(
            "pt-BR",
            "import.partial",
            &[("imported", "3"), ("rejected", "2"), ("reasons", "x; y")],
        );
        assert_eq!(msg, "3 registros importados, 2 rejeitados: x; y");
    }

    #[test]
    fn test_unknown_placeholder_left_intact() {
        let msg = fill_args("%{a} e %{b}".to_string(), &[("a", "1")]);
        assert_eq!(msg, "1 e %{b}");
    }
}
