// ==========================================
// 员工离职管理 - 领域类型定义
// ==========================================
// 职责: 离职类型、日期顺序等基础枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 离职类型 (Exit Type)
// ==========================================
// 序列化格式: 与历史存储一致（pedido_demissao / demissao_empresa）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExitType {
    #[default]
    #[serde(rename = "pedido_demissao")]
    Voluntary, // 员工主动提出
    #[serde(rename = "demissao_empresa")]
    Company, // 公司发起
}

impl ExitType {
    pub const ALL: [ExitType; 2] = [ExitType::Voluntary, ExitType::Company];

    /// 存储编码
    pub fn code(&self) -> &'static str {
        match self {
            ExitType::Voluntary => "pedido_demissao",
            ExitType::Company => "demissao_empresa",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            ExitType::Voluntary => "exit_type.voluntary",
            ExitType::Company => "exit_type.company",
        }
    }

    pub fn short_label_key(&self) -> &'static str {
        match self {
            ExitType::Voluntary => "exit_type.voluntary_short",
            ExitType::Company => "exit_type.company_short",
        }
    }

    /// 展示名称（当前语言）
    pub fn label(&self) -> String {
        crate::i18n::t(self.label_key())
    }

    /// 简短展示名称（列表、最近离职卡片）
    pub fn short_label(&self) -> String {
        crate::i18n::t(self.short_label_key())
    }
}

impl fmt::Display for ExitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ExitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pedido_demissao" => Ok(ExitType::Voluntary),
            "demissao_empresa" => Ok(ExitType::Company),
            other => Err(format!("未知离职类型: {}", other)),
        }
    }
}

// ==========================================
// 日期顺序 (Date Order)
// ==========================================
// 用途: 解析 NN/NN/YYYY 形式的本地化日期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateOrder {
    #[default]
    Dmy, // 日/月/年（pt-BR）
    Mdy, // 月/日/年（en-US）
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::Dmy => write!(f, "DMY"),
            DateOrder::Mdy => write!(f, "MDY"),
        }
    }
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DMY" => Ok(DateOrder::Dmy),
            "MDY" => Ok(DateOrder::Mdy),
            other => Err(format!("未知日期顺序: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_type_code_roundtrip() {
        assert_eq!("pedido_demissao".parse::<ExitType>(), Ok(ExitType::Voluntary));
        assert_eq!("demissao_empresa".parse::<ExitType>(), Ok(ExitType::Company));
        assert!("outro".parse::<ExitType>().is_err());
        assert_eq!(ExitType::Company.to_string(), "demissao_empresa");
    }

    #[test]
    fn test_exit_type_serde_uses_storage_code() {
        let json = serde_json::to_string(&ExitType::Voluntary).unwrap();
        assert_eq!(json, "\"pedido_demissao\"");
    }

    #[test]
    fn test_date_order_parse() {
        assert_eq!("dmy".parse::<DateOrder>(), Ok(DateOrder::Dmy));
        assert_eq!(" MDY ".parse::<DateOrder>(), Ok(DateOrder::Mdy));
        assert!("YMD".parse::<DateOrder>().is_err());
    }
}
