//! 结构体字段提取：把 [`Record`] 展开为有序的 (列名, 值) 列表

use crate::bind_value::BindValue;
use crate::error::{Result, SqlStmtError};
use crate::macros_api::Record;

/// 未标注字段的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPolicy {
    /// 跳过未标注字段（记录 debug 日志）
    Lenient,
    /// 未标注字段直接报错
    Strict,
}

/// 已标注字段
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedField {
    pub column: &'static str,
    pub value: BindValue,
}

#[derive(Debug, Clone, Copy)]
pub struct Reflector {
    policy: TagPolicy,
    skip_empty: bool,
}

impl Reflector {
    pub fn new(policy: TagPolicy) -> Self {
        Self {
            policy,
            skip_empty: false,
        }
    }

    /// 为 true 时，值为零值的字段不出现在结果中
    pub fn with_skip_empty(mut self, skip_empty: bool) -> Self {
        self.skip_empty = skip_empty;
        self
    }

    /// 按声明顺序提取已标注字段
    pub fn extract<R: Record>(&self, record: &R) -> Result<Vec<TaggedField>> {
        let mut fields = Vec::with_capacity(R::FIELDS.len());
        for meta in R::FIELDS {
            let Some(column) = meta.column else {
                match self.policy {
                    TagPolicy::Strict => {
                        return Err(SqlStmtError::MissingFieldTag {
                            record: R::TABLE,
                            field: meta.name,
                        });
                    }
                    TagPolicy::Lenient => {
                        tracing::debug!(table = R::TABLE, field = meta.name, "field has no column tag, skip");
                        continue;
                    }
                }
            };
            let value = record.field_value(meta.name).ok_or_else(|| {
                SqlStmtError::InvalidField(format!(
                    "Field '{}' is tagged but '{}' returned no value",
                    meta.name,
                    R::TABLE
                ))
            })?;
            if self.skip_empty && value.is_empty() {
                tracing::trace!(table = R::TABLE, column, "empty value skipped");
                continue;
            }
            fields.push(TaggedField { column, value });
        }
        Ok(fields)
    }

    /// 只取列名（不做 skip-empty 过滤），用于 SELECT 投影
    pub fn columns<R: Record>(&self) -> Result<Vec<&'static str>> {
        let mut columns = Vec::with_capacity(R::FIELDS.len());
        for meta in R::FIELDS {
            match (meta.column, self.policy) {
                (Some(column), _) => columns.push(column),
                (None, TagPolicy::Strict) => {
                    return Err(SqlStmtError::MissingFieldTag {
                        record: R::TABLE,
                        field: meta.name,
                    });
                }
                (None, TagPolicy::Lenient) => {}
            }
        }
        Ok(columns)
    }
}
