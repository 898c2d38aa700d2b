//! 条件渲染：操作符文本与绑定值变换

use serde::Deserialize;

use crate::bind_value::BindValue;
use crate::error::{Result, SqlStmtError};

/// SQL 比较操作符
///
/// 三种 LIKE 的通配符位置：
/// - `Like`：`%value%`，包含匹配
/// - `LikePrefix`：`value%`，前缀匹配（以 value 开头）
/// - `LikeSuffix`：`%value`，后缀匹配（以 value 结尾）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// 未设置，仅作为非法占位值，不能用于渲染
    #[default]
    Unset,
    /// 等于: =
    Eq,
    /// 不等于: <>
    Ne,
    /// 大于: >
    Gt,
    /// 大于等于: >=
    Ge,
    /// 小于: <
    Lt,
    /// 小于等于: <=
    Le,
    Like,
    LikePrefix,
    LikeSuffix,
}

impl Operator {
    /// 操作符文本；LIKE 两侧带空格，便于直接与列名、占位符拼接
    pub fn as_sql(self) -> Result<&'static str> {
        match self {
            Operator::Unset => Err(SqlStmtError::InvalidPredicate),
            Operator::Eq => Ok("="),
            Operator::Ne => Ok("<>"),
            Operator::Gt => Ok(">"),
            Operator::Ge => Ok(">="),
            Operator::Lt => Ok("<"),
            Operator::Le => Ok("<="),
            Operator::Like | Operator::LikePrefix | Operator::LikeSuffix => Ok(" LIKE "),
        }
    }

    fn is_like(self) -> bool {
        matches!(
            self,
            Operator::Like | Operator::LikePrefix | Operator::LikeSuffix
        )
    }

    /// 渲染操作符并变换绑定值（LIKE 系列拼接 `%`）
    ///
    /// LIKE 系列不接受 `Null`，否则会生成匹配所有行的 `%%`。
    pub fn render(self, value: BindValue) -> Result<(&'static str, BindValue)> {
        let op = self.as_sql()?;
        if self.is_like() && value == BindValue::Null {
            return Err(SqlStmtError::InvalidField(
                "LIKE pattern cannot be NULL".to_string(),
            ));
        }
        let value = match self {
            Operator::Like => BindValue::String(format!("%{}%", value.pattern_text())),
            Operator::LikePrefix => BindValue::String(format!("{}%", value.pattern_text())),
            Operator::LikeSuffix => BindValue::String(format!("%{}", value.pattern_text())),
            _ => value,
        };
        Ok((op, value))
    }
}

/// OR 分组中的单个条件，只作为 `where_or` 的输入
#[derive(Debug, Clone, PartialEq)]
pub struct OrCondition {
    pub field: String,
    pub operator: Operator,
    pub value: BindValue,
}

impl OrCondition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<BindValue>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_text() {
        assert_eq!(Operator::Eq.as_sql().unwrap(), "=");
        assert_eq!(Operator::Ne.as_sql().unwrap(), "<>");
        assert_eq!(Operator::Gt.as_sql().unwrap(), ">");
        assert_eq!(Operator::Ge.as_sql().unwrap(), ">=");
        assert_eq!(Operator::Lt.as_sql().unwrap(), "<");
        assert_eq!(Operator::Le.as_sql().unwrap(), "<=");
        assert_eq!(Operator::Like.as_sql().unwrap(), " LIKE ");
        assert_eq!(Operator::LikePrefix.as_sql().unwrap(), " LIKE ");
        assert_eq!(Operator::LikeSuffix.as_sql().unwrap(), " LIKE ");
    }

    #[test]
    fn test_like_transforms() {
        let (_, v) = Operator::Like.render("x".into()).unwrap();
        assert_eq!(v, BindValue::String("%x%".to_string()));
        let (_, v) = Operator::LikePrefix.render("x".into()).unwrap();
        assert_eq!(v, BindValue::String("x%".to_string()));
        let (_, v) = Operator::LikeSuffix.render("x".into()).unwrap();
        assert_eq!(v, BindValue::String("%x".to_string()));
    }

    #[test]
    fn test_comparison_keeps_value() {
        let (op, v) = Operator::Ge.render(5i64.into()).unwrap();
        assert_eq!(op, ">=");
        assert_eq!(v, BindValue::Int64(5));
    }

    #[test]
    fn test_like_rejects_null() {
        for op in [Operator::Like, Operator::LikePrefix, Operator::LikeSuffix] {
            assert!(matches!(
                op.render(BindValue::Null),
                Err(SqlStmtError::InvalidField(_))
            ));
        }
        // 非 LIKE 操作符照常绑定 NULL
        let (_, v) = Operator::Eq.render(BindValue::Null).unwrap();
        assert_eq!(v, BindValue::Null);
    }

    #[test]
    fn test_unset_is_rejected() {
        assert_eq!(Operator::default(), Operator::Unset);
        assert_eq!(
            Operator::Unset.render(1i64.into()),
            Err(SqlStmtError::InvalidPredicate)
        );
    }
}
