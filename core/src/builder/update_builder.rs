//! UPDATE SET 构建

use crate::bind_value::BindValue;
use crate::error::Result;
use crate::macros_api::Record;
use crate::reflect::{Reflector, TagPolicy};
use crate::statement::{Statement, StatementKind};

impl Statement {
    /// 追加 `field=?` 到 SET 列表（逗号分隔）
    pub fn update_set(&mut self, field: &str, value: impl Into<BindValue>) -> Result<&mut Self> {
        self.ensure_kind("update_set", &[StatementKind::Update])?;
        self.assignments.push((field.to_string(), value.into()));
        Ok(self)
    }

    /// 按结构体已标注字段追加 SET，等价于逐个调用 `update_set`
    ///
    /// 未标注字段跳过；`skip_empty` 为 true 时零值字段不出现在 SET 和参数中。
    pub fn update_by_struct<R: Record>(
        &mut self,
        record: &R,
        skip_empty: bool,
    ) -> Result<&mut Self> {
        self.ensure_kind("update_by_struct", &[StatementKind::Update])?;
        self.extend_assignments(record, TagPolicy::Lenient, skip_empty)
    }

    /// 与 `update_by_struct` 相同，但任一字段缺少列名标注时返回 `MissingFieldTag`，语句保持不变
    pub fn update_by_struct_strict<R: Record>(
        &mut self,
        record: &R,
        skip_empty: bool,
    ) -> Result<&mut Self> {
        self.ensure_kind("update_by_struct_strict", &[StatementKind::Update])?;
        self.extend_assignments(record, TagPolicy::Strict, skip_empty)
    }

    fn extend_assignments<R: Record>(
        &mut self,
        record: &R,
        policy: TagPolicy,
        skip_empty: bool,
    ) -> Result<&mut Self> {
        let fields = Reflector::new(policy)
            .with_skip_empty(skip_empty)
            .extract(record)?;
        self.assignments
            .extend(fields.into_iter().map(|f| (f.column.to_string(), f.value)));
        Ok(self)
    }
}
