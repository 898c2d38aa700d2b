//! 参数化 SQL 语句拼装
//!
//! 通过一系列子句调用生成一条 SQL 文本和与占位符一一对应的参数列表，
//! 不执行语句，也不连接数据库。
//!
//! ```ignore
//! use sqlstmt::{Statement, OrCondition, Operator};
//!
//! let mut stmt = Statement::select("skill");
//! stmt.where_eq("skill_type", 1)?
//!     .where_in("status", vec![1, 2])?
//!     .where_or(vec![OrCondition::new("desc", Operator::LikePrefix, "abc")])?;
//! let (sql, args) = stmt.build();
//! ```

pub mod bind_value;
pub mod builder;
pub mod condition;
pub mod config;
pub mod error;
pub mod macros_api;
pub mod reflect;
pub mod statement;
pub mod utils;

pub use bind_value::BindValue;
pub use condition::{OrCondition, Operator};
pub use config::{BuilderConfig, Placeholder};
pub use macros_api::{FieldMeta, Record};
pub use reflect::{Reflector, TagPolicy, TaggedField};
pub use statement::{Statement, StatementKind};

pub use error::{Result, SqlStmtError};

// 重新导出 derive 宏
pub use sqlstmt_derive::*;
