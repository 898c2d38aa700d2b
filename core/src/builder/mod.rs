//! 子句构建模块
//!
//! 所有子句方法都直接修改 [`Statement`](crate::Statement)：
//! 先校验（语句类型、参数列表），再写入，失败时语句保持不变。
//!
//! - `where_builder`：WHERE 条件，SELECT / UPDATE / DELETE 通用
//! - `update_builder`：UPDATE SET
//! - `insert_builder`：INSERT 行
//! - `select_builder`：投影、GROUP BY、ORDER BY、LIMIT

pub mod insert_builder;
pub mod select_builder;
pub mod update_builder;
pub mod where_builder;
