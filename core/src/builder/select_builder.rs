//! SELECT 专用子句：投影、GROUP BY、ORDER BY、LIMIT

use crate::error::Result;
use crate::macros_api::Record;
use crate::reflect::{Reflector, TagPolicy};
use crate::statement::{Projection, Statement, StatementKind, TailClause};

impl Statement {
    /// 由结构体生成投影列，并同时添加等值条件
    ///
    /// 注意这一个调用有两个效果：
    /// 1. 投影列替换为所有已标注字段（未标注字段跳过）；
    /// 2. 对每个已标注字段追加 `col=?` 条件；`skip_empty` 为 true 时零值字段不加条件。
    ///
    /// 只想要过滤条件时使用 `where_by_struct`。
    pub fn select_by_struct<R: Record>(
        &mut self,
        record: &R,
        skip_empty: bool,
    ) -> Result<&mut Self> {
        self.ensure_kind("select_by_struct", &[StatementKind::Select])?;
        let reflector = Reflector::new(TagPolicy::Lenient).with_skip_empty(skip_empty);
        let columns = reflector.columns::<R>()?;
        let fields = reflector.extract(record)?;

        self.projection = Projection::Columns(columns.into_iter().map(str::to_string).collect());
        for field in fields {
            self.push_eq(field.column, field.value);
        }
        Ok(self)
    }

    /// 替换默认的 `*` 投影，文本原样输出
    pub fn set_projected_fields(&mut self, fields: &str) -> Result<&mut Self> {
        self.ensure_kind("set_projected_fields", &[StatementKind::Select])?;
        self.projection = Projection::Raw(fields.to_string());
        Ok(self)
    }

    /// `LIMIT offset,size`
    pub fn limit(&mut self, offset: u64, size: u64) -> Result<&mut Self> {
        self.ensure_kind("limit", &[StatementKind::Select])?;
        self.tail.push(TailClause::Limit { offset, size });
        Ok(self)
    }

    /// `GROUP BY <text>`，文本原样输出，引号由调用方负责
    pub fn group_by(&mut self, fields: &str) -> Result<&mut Self> {
        self.ensure_kind("group_by", &[StatementKind::Select])?;
        self.tail.push(TailClause::GroupBy(fields.to_string()));
        Ok(self)
    }

    /// `ORDER BY <text>`，文本原样输出，引号由调用方负责
    pub fn order_by(&mut self, fields: &str) -> Result<&mut Self> {
        self.ensure_kind("order_by", &[StatementKind::Select])?;
        self.tail.push(TailClause::OrderBy(fields.to_string()));
        Ok(self)
    }
}
