use serde::Serialize;

use crate::error::{Result, SqlStmtError};

/// 绑定值，按占位符顺序交给下游驱动
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindValue {
    String(String),
    Int64(i64),
    Int32(i32),
    Int16(i16),
    Int8(i8),
    UInt64(u64),
    UInt32(u32),
    UInt16(u16),
    UInt8(u8),
    Float64(f64),
    Float32(f32),
    Bool(bool),
    Bytes(Vec<u8>),
    DateTime(chrono::NaiveDateTime),
    Null,
}

impl BindValue {
    /// 是否为该类型的零值（空字符串、数值 0、false、空字节、NULL）
    ///
    /// skip-empty 过滤只看值本身，不区分“调用方显式设置了零值”和“未设置”。
    pub fn is_empty(&self) -> bool {
        match self {
            BindValue::String(s) => s.is_empty(),
            BindValue::Int64(i) => *i == 0,
            BindValue::Int32(i) => *i == 0,
            BindValue::Int16(i) => *i == 0,
            BindValue::Int8(i) => *i == 0,
            BindValue::UInt64(i) => *i == 0,
            BindValue::UInt32(i) => *i == 0,
            BindValue::UInt16(i) => *i == 0,
            BindValue::UInt8(i) => *i == 0,
            BindValue::Float64(f) => *f == 0.0,
            BindValue::Float32(f) => *f == 0.0,
            BindValue::Bool(b) => !b,
            BindValue::Bytes(b) => b.is_empty(),
            BindValue::DateTime(_) => false,
            BindValue::Null => true,
        }
    }

    /// 是否为空字符串（IN 列表只丢弃这一种值）
    pub fn is_empty_string(&self) -> bool {
        matches!(self, BindValue::String(s) if s.is_empty())
    }

    /// LIKE 模式拼接使用的文本形式
    pub(crate) fn pattern_text(&self) -> String {
        match self {
            BindValue::String(s) => s.clone(),
            BindValue::Int64(i) => i.to_string(),
            BindValue::Int32(i) => i.to_string(),
            BindValue::Int16(i) => i.to_string(),
            BindValue::Int8(i) => i.to_string(),
            BindValue::UInt64(i) => i.to_string(),
            BindValue::UInt32(i) => i.to_string(),
            BindValue::UInt16(i) => i.to_string(),
            BindValue::UInt8(i) => i.to_string(),
            BindValue::Float64(f) => f.to_string(),
            BindValue::Float32(f) => f.to_string(),
            BindValue::Bool(b) => b.to_string(),
            BindValue::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            BindValue::DateTime(dt) => dt.to_string(),
            BindValue::Null => String::new(),
        }
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::String(s)
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::String(s.to_string())
    }
}

impl From<i64> for BindValue {
    fn from(i: i64) -> Self {
        BindValue::Int64(i)
    }
}

impl From<i32> for BindValue {
    fn from(i: i32) -> Self {
        BindValue::Int32(i)
    }
}

impl From<i16> for BindValue {
    fn from(i: i16) -> Self {
        BindValue::Int16(i)
    }
}

impl From<i8> for BindValue {
    fn from(i: i8) -> Self {
        BindValue::Int8(i)
    }
}

impl From<u64> for BindValue {
    fn from(i: u64) -> Self {
        BindValue::UInt64(i)
    }
}

impl From<u32> for BindValue {
    fn from(i: u32) -> Self {
        BindValue::UInt32(i)
    }
}

impl From<u16> for BindValue {
    fn from(i: u16) -> Self {
        BindValue::UInt16(i)
    }
}

impl From<u8> for BindValue {
    fn from(i: u8) -> Self {
        BindValue::UInt8(i)
    }
}

impl From<f64> for BindValue {
    fn from(f: f64) -> Self {
        BindValue::Float64(f)
    }
}

impl From<f32> for BindValue {
    fn from(f: f32) -> Self {
        BindValue::Float32(f)
    }
}

impl From<bool> for BindValue {
    fn from(b: bool) -> Self {
        BindValue::Bool(b)
    }
}

impl From<Vec<u8>> for BindValue {
    fn from(b: Vec<u8>) -> Self {
        BindValue::Bytes(b)
    }
}

impl From<chrono::NaiveDateTime> for BindValue {
    fn from(dt: chrono::NaiveDateTime) -> Self {
        BindValue::DateTime(dt)
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => BindValue::Null,
        }
    }
}

/// JSON 标量转换（CLI 使用），数组和对象不能作为单个绑定值
impl TryFrom<serde_json::Value> for BindValue {
    type Error = SqlStmtError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(BindValue::Null),
            serde_json::Value::Bool(b) => Ok(BindValue::Bool(b)),
            serde_json::Value::String(s) => Ok(BindValue::String(s)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(BindValue::Int64(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(BindValue::UInt64(u))
                } else if let Some(f) = n.as_f64() {
                    Ok(BindValue::Float64(f))
                } else {
                    Err(SqlStmtError::InvalidField(format!("unsupported number {}", n)))
                }
            }
            other => Err(SqlStmtError::InvalidField(format!(
                "expected a scalar value, got {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_are_empty() {
        assert!(BindValue::from("").is_empty());
        assert!(BindValue::from(0i64).is_empty());
        assert!(BindValue::from(0i32).is_empty());
        assert!(BindValue::from(0u8).is_empty());
        assert!(BindValue::from(0.0f64).is_empty());
        assert!(BindValue::from(false).is_empty());
        assert!(BindValue::from(None::<i64>).is_empty());
        assert!(BindValue::Bytes(Vec::new()).is_empty());
        assert!(BindValue::from(Some(0i32)).is_empty());
    }

    #[test]
    fn test_non_zero_values_are_not_empty() {
        assert!(!BindValue::from("x").is_empty());
        assert!(!BindValue::from(-1i64).is_empty());
        assert!(!BindValue::from(0.5f32).is_empty());
        assert!(!BindValue::from(true).is_empty());
        let epoch = chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        assert!(!BindValue::from(epoch).is_empty());
    }

    #[test]
    fn test_empty_string_only() {
        assert!(BindValue::from("").is_empty_string());
        assert!(!BindValue::from(0i64).is_empty_string());
        assert!(!BindValue::Null.is_empty_string());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(BindValue::from(Some("a")), BindValue::String("a".to_string()));
        assert_eq!(BindValue::from(None::<String>), BindValue::Null);
    }

    #[test]
    fn test_pattern_text() {
        assert_eq!(BindValue::from("abc").pattern_text(), "abc");
        assert_eq!(BindValue::from(42i32).pattern_text(), "42");
        assert_eq!(BindValue::from(true).pattern_text(), "true");
    }

    #[test]
    fn test_from_json() {
        assert_eq!(
            BindValue::try_from(serde_json::json!(7)).unwrap(),
            BindValue::Int64(7)
        );
        assert_eq!(
            BindValue::try_from(serde_json::json!("x")).unwrap(),
            BindValue::String("x".to_string())
        );
        assert_eq!(
            BindValue::try_from(serde_json::json!(1.5)).unwrap(),
            BindValue::Float64(1.5)
        );
        assert_eq!(
            BindValue::try_from(serde_json::Value::Null).unwrap(),
            BindValue::Null
        );
        assert!(BindValue::try_from(serde_json::json!([1, 2])).is_err());
    }

    #[test]
    fn test_serialize_untagged() {
        let values = vec![
            BindValue::from(1i64),
            BindValue::from("a"),
            BindValue::Null,
        ];
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"[1,"a",null]"#);
    }
}
