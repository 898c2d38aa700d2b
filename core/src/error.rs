use thiserror::Error;

use crate::statement::StatementKind;

#[derive(Debug, Error, PartialEq)]
pub enum SqlStmtError {
    /// 操作与语句类型不匹配，例如在 SELECT 语句上调用 update_set
    #[error("`{operation}` cannot be used on a {kind} statement")]
    WrongStatementKind {
        operation: &'static str,
        kind: StatementKind,
    },
    /// 严格模式下字段缺少列名标注
    #[error("Field '{field}' of '{record}' has no column tag")]
    MissingFieldTag {
        record: &'static str,
        field: &'static str,
    },
    /// IN / OR 等需要至少一个元素的操作收到了空列表
    #[error("`{0}` requires at least one value")]
    EmptyArgumentList(&'static str),
    /// 未设置的操作符被传入条件渲染
    #[error("Predicate operator is unset")]
    InvalidPredicate,
    /// Invalid field error
    #[error("Invalid field: {0}")]
    InvalidField(String),
    /// 配置解析失败
    #[error("Invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SqlStmtError>;
