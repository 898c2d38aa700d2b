//! 构建器配置

use serde::Deserialize;

use crate::error::{Result, SqlStmtError};

/// 占位符样式
///
/// - `Marker`：每个绑定值使用相同的标记，例如 MySQL / SQLite 的 `?`
/// - `Numbered`：前缀加从 1 开始的序号，例如 PostgreSQL 的 `$1, $2`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    Marker(String),
    Numbered(String),
}

impl Placeholder {
    /// 第 `index` 个（从 0 开始）绑定值的占位符
    pub fn render(&self, index: usize) -> String {
        match self {
            Placeholder::Marker(marker) => marker.clone(),
            Placeholder::Numbered(prefix) => format!("{}{}", prefix, index + 1),
        }
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        Placeholder::Marker("?".to_string())
    }
}

impl From<&str> for Placeholder {
    fn from(marker: &str) -> Self {
        Placeholder::Marker(marker.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub placeholder: Placeholder,
    /// 是否用反引号包裹表名和列名
    pub quote_identifiers: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            placeholder: Placeholder::default(),
            quote_identifiers: true,
        }
    }
}

impl BuilderConfig {
    /// 从 JSON 文本解析，缺省字段使用默认值
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SqlStmtError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuilderConfig::default();
        assert_eq!(config.placeholder, Placeholder::Marker("?".to_string()));
        assert!(config.quote_identifiers);
    }

    #[test]
    fn test_placeholder_render() {
        assert_eq!(Placeholder::default().render(3), "?");
        assert_eq!(Placeholder::Numbered("$".to_string()).render(0), "$1");
        assert_eq!(Placeholder::Numbered(":p".to_string()).render(4), ":p5");
    }

    #[test]
    fn test_from_json_str() {
        let config = BuilderConfig::from_json_str(r#"{"placeholder": {"numbered": "$"}}"#).unwrap();
        assert_eq!(config.placeholder, Placeholder::Numbered("$".to_string()));
        assert!(config.quote_identifiers);

        let config = BuilderConfig::from_json_str(r#"{"quote_identifiers": false}"#).unwrap();
        assert_eq!(config.placeholder, Placeholder::default());
        assert!(!config.quote_identifiers);
    }

    #[test]
    fn test_from_json_str_invalid() {
        let err = BuilderConfig::from_json_str(r#"{"placeholder": 3}"#).unwrap_err();
        assert!(matches!(err, SqlStmtError::Config(_)));
    }
}
