//! 宏接口模块，供 proc-macro crate 使用
//!
//! `#[derive(Record)]` 为结构体生成 [`Record`] 实现；也可以手写实现。

use crate::bind_value::BindValue;

/// 字段元数据，按结构体声明顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Rust 字段名
    pub name: &'static str,
    /// 列名标注：None 表示该字段没有 `#[column]` 标注
    pub column: Option<&'static str>,
}

/// 可映射到数据表行的记录类型
///
/// `FIELDS` 的顺序决定了渲染出的列顺序和参数顺序。
pub trait Record {
    /// 表名
    const TABLE: &'static str;
    /// 字段列表（含未标注字段）
    const FIELDS: &'static [FieldMeta];

    /// 根据 Rust 字段名取值；未标注或不存在的字段返回 None
    fn field_value(&self, name: &str) -> Option<BindValue>;
}
