//! 语句状态与最终拼装
//!
//! 子句在调用时只记录为结构化的条件项，SQL 文本在 [`Statement::to_sql`] 时统一生成；
//! [`Statement::args`] 按与渲染完全相同的顺序遍历同一份结构，
//! 因此占位符数量和参数数量始终一致。

use std::fmt;

use serde::Deserialize;

use crate::bind_value::BindValue;
use crate::config::{BuilderConfig, Placeholder};
use crate::error::{Result, SqlStmtError};
use crate::macros_api::Record;
use crate::utils::escape_identifier;

/// 语句类型，构造后不可更改
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Insert,
    Update,
    Select,
    Delete,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Select => "SELECT",
            StatementKind::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// 条件类型：AND 或 OR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConditionType {
    And,
    Or,
}

/// 单个谓词的形态
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PredicateOp {
    /// 比较 / LIKE，携带操作符文本
    Compare(&'static str),
    In,
    NotIn,
    Between,
    IsNull,
    IsNotNull,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Predicate {
    pub(crate) field: String,
    pub(crate) op: PredicateOp,
    pub(crate) binds: Vec<BindValue>,
}

/// 条件项：单个谓词，或 OR 调用产生的 AND 组
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ConditionItem {
    Single(Predicate, ConditionType),
    Group(Vec<Predicate>, ConditionType),
}

/// SELECT 尾部子句，按调用顺序输出
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TailClause {
    GroupBy(String),
    OrderBy(String),
    Limit { offset: u64, size: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Projection {
    /// `*`
    All,
    /// 由结构体标注生成的列，渲染时按配置加引号
    Columns(Vec<String>),
    /// 调用方提供的原始文本
    Raw(String),
}

/// 一条待拼装的 SQL 语句
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub(crate) kind: StatementKind,
    pub(crate) table: String,
    pub(crate) config: BuilderConfig,
    pub(crate) projection: Projection,
    /// INSERT 的 (列, 值)
    pub(crate) insert_row: Vec<(String, BindValue)>,
    /// UPDATE SET 的 (列, 值)
    pub(crate) assignments: Vec<(String, BindValue)>,
    pub(crate) conditions: Vec<ConditionItem>,
    pub(crate) tail: Vec<TailClause>,
}

impl Statement {
    pub fn new(table: impl Into<String>, kind: StatementKind) -> Self {
        Self {
            kind,
            table: table.into(),
            config: BuilderConfig::default(),
            projection: Projection::All,
            insert_row: Vec::new(),
            assignments: Vec::new(),
            conditions: Vec::new(),
            tail: Vec::new(),
        }
    }

    pub fn select(table: impl Into<String>) -> Self {
        Self::new(table, StatementKind::Select)
    }

    pub fn update(table: impl Into<String>) -> Self {
        Self::new(table, StatementKind::Update)
    }

    pub fn insert(table: impl Into<String>) -> Self {
        Self::new(table, StatementKind::Insert)
    }

    pub fn delete(table: impl Into<String>) -> Self {
        Self::new(table, StatementKind::Delete)
    }

    /// 使用 `R::TABLE` 作为表名
    pub fn for_record<R: Record>(kind: StatementKind) -> Self {
        Self::new(R::TABLE, kind)
    }

    /// 替换配置（链式调用）
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置占位符
    ///
    /// 占位符在渲染时统一生成，因此无论何时调用都作用于整条语句。
    pub fn set_placeholder(&mut self, placeholder: impl Into<Placeholder>) -> &mut Self {
        self.config.placeholder = placeholder.into();
        self
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// 是否已有 WHERE 条件
    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// 检查语句类型，不匹配时返回 `WrongStatementKind`
    pub(crate) fn ensure_kind(
        &self,
        operation: &'static str,
        allowed: &[StatementKind],
    ) -> Result<()> {
        if allowed.contains(&self.kind) {
            Ok(())
        } else {
            Err(SqlStmtError::WrongStatementKind {
                operation,
                kind: self.kind,
            })
        }
    }

    /// 追加一个条件项；第一项的连接符不输出
    pub(crate) fn push_condition(&mut self, item: ConditionItem) {
        self.conditions.push(item);
    }

    /// 生成完整 SQL（以 `;` 结尾）
    ///
    /// 不做完整性检查：INSERT 在未调用 `insert_row` / `insert_by_struct` 时返回空字符串，
    /// UPDATE 没有 SET 时原样输出 `UPDATE t SET ;`（不是合法 SQL）。
    /// 需要检查时使用 [`Statement::try_build`]。
    pub fn to_sql(&self) -> String {
        let mut renderer = Renderer::new(&self.config);
        let sql = match self.kind {
            StatementKind::Insert => {
                if self.insert_row.is_empty() {
                    String::new()
                } else {
                    let columns: Vec<String> = self
                        .insert_row
                        .iter()
                        .map(|(column, _)| renderer.ident(column))
                        .collect();
                    let placeholders: Vec<String> =
                        self.insert_row.iter().map(|_| renderer.next_placeholder()).collect();
                    format!(
                        "INSERT INTO {}({}) VALUES({});",
                        renderer.ident(&self.table),
                        columns.join(","),
                        placeholders.join(",")
                    )
                }
            }
            StatementKind::Update => {
                let sets: Vec<String> = self
                    .assignments
                    .iter()
                    .map(|(column, _)| {
                        format!("{}={}", renderer.ident(column), renderer.next_placeholder())
                    })
                    .collect();
                let where_sql = self.render_where(&mut renderer);
                format!(
                    "UPDATE {} SET {}{};",
                    renderer.ident(&self.table),
                    sets.join(","),
                    where_sql
                )
            }
            StatementKind::Select => {
                let fields = match &self.projection {
                    Projection::All => "*".to_string(),
                    Projection::Columns(columns) => columns
                        .iter()
                        .map(|c| renderer.ident(c))
                        .collect::<Vec<_>>()
                        .join(","),
                    Projection::Raw(raw) => raw.clone(),
                };
                let where_sql = self.render_where(&mut renderer);
                format!(
                    "SELECT {} FROM {}{}{};",
                    fields,
                    renderer.ident(&self.table),
                    where_sql,
                    self.render_tail()
                )
            }
            StatementKind::Delete => {
                let where_sql = self.render_where(&mut renderer);
                format!("DELETE FROM {}{};", renderer.ident(&self.table), where_sql)
            }
        };
        tracing::debug!(kind = %self.kind, binds = renderer.count, sql = %sql, "statement rendered");
        sql
    }

    /// 所有绑定值，顺序与 `to_sql` 中占位符出现的顺序一致
    pub fn args(&self) -> Vec<BindValue> {
        let mut args = Vec::new();
        match self.kind {
            StatementKind::Insert => {
                args.extend(self.insert_row.iter().map(|(_, v)| v.clone()));
            }
            StatementKind::Update => {
                args.extend(self.assignments.iter().map(|(_, v)| v.clone()));
                self.collect_where_binds(&mut args);
            }
            StatementKind::Select | StatementKind::Delete => {
                self.collect_where_binds(&mut args);
            }
        }
        args
    }

    /// 同时返回 SQL 和参数
    pub fn build(&self) -> (String, Vec<BindValue>) {
        (self.to_sql(), self.args())
    }

    /// 与 `build` 相同，但 INSERT 没有行、UPDATE 没有 SET 时返回 `EmptyArgumentList`
    pub fn try_build(&self) -> Result<(String, Vec<BindValue>)> {
        match self.kind {
            StatementKind::Insert if self.insert_row.is_empty() => {
                Err(SqlStmtError::EmptyArgumentList("insert_row"))
            }
            StatementKind::Update if self.assignments.is_empty() => {
                Err(SqlStmtError::EmptyArgumentList("update_set"))
            }
            _ => Ok(self.build()),
        }
    }

    fn collect_where_binds(&self, args: &mut Vec<BindValue>) {
        for item in &self.conditions {
            match item {
                ConditionItem::Single(predicate, _) => args.extend(predicate.binds.iter().cloned()),
                ConditionItem::Group(predicates, _) => {
                    for predicate in predicates {
                        args.extend(predicate.binds.iter().cloned());
                    }
                }
            }
        }
    }

    /// 生成 ` WHERE ...`；没有条件时返回空字符串
    ///
    /// 从左到右拼接，已生成的部分不会再被加括号：
    /// 第一个条件项为 OR 组时不加括号，之后的 OR 组用 `OR (...)` 连接。
    fn render_where(&self, renderer: &mut Renderer<'_>) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }

        let mut sql = String::from(" WHERE ");
        for (i, item) in self.conditions.iter().enumerate() {
            let condition_type = match item {
                ConditionItem::Single(_, ct) => *ct,
                ConditionItem::Group(_, ct) => *ct,
            };
            if i > 0 {
                match condition_type {
                    ConditionType::And => sql.push_str(" AND "),
                    ConditionType::Or => sql.push_str(" OR "),
                }
            }
            match item {
                ConditionItem::Single(predicate, _) => {
                    sql.push_str(&renderer.predicate(predicate));
                }
                ConditionItem::Group(predicates, _) => {
                    let group = predicates
                        .iter()
                        .map(|p| renderer.predicate(p))
                        .collect::<Vec<_>>()
                        .join(" AND ");
                    if i == 0 {
                        sql.push_str(&group);
                    } else {
                        sql.push('(');
                        sql.push_str(&group);
                        sql.push(')');
                    }
                }
            }
        }
        sql
    }

    fn render_tail(&self) -> String {
        let mut sql = String::new();
        for clause in &self.tail {
            match clause {
                TailClause::GroupBy(text) => {
                    sql.push_str(" GROUP BY ");
                    sql.push_str(text);
                }
                TailClause::OrderBy(text) => {
                    sql.push_str(" ORDER BY ");
                    sql.push_str(text);
                }
                TailClause::Limit { offset, size } => {
                    sql.push_str(&format!(" LIMIT {},{}", offset, size));
                }
            }
        }
        sql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// 渲染过程中的占位符计数
struct Renderer<'a> {
    config: &'a BuilderConfig,
    count: usize,
}

impl<'a> Renderer<'a> {
    fn new(config: &'a BuilderConfig) -> Self {
        Self { config, count: 0 }
    }

    fn next_placeholder(&mut self) -> String {
        let placeholder = self.config.placeholder.render(self.count);
        self.count += 1;
        placeholder
    }

    fn ident(&self, name: &str) -> String {
        if self.config.quote_identifiers {
            escape_identifier(name)
        } else {
            name.to_string()
        }
    }

    fn placeholders(&mut self, n: usize) -> String {
        (0..n).map(|_| self.next_placeholder()).collect::<Vec<_>>().join(",")
    }

    fn predicate(&mut self, predicate: &Predicate) -> String {
        let field = self.ident(&predicate.field);
        match &predicate.op {
            PredicateOp::Compare(op) => format!("{}{}{}", field, op, self.next_placeholder()),
            PredicateOp::In => format!("{} IN ({})", field, self.placeholders(predicate.binds.len())),
            PredicateOp::NotIn => {
                format!("{} NOT IN ({})", field, self.placeholders(predicate.binds.len()))
            }
            PredicateOp::Between => {
                let low = self.next_placeholder();
                let high = self.next_placeholder();
                format!("{} BETWEEN {} AND {}", field, low, high)
            }
            PredicateOp::IsNull => format!("{} IS NULL", field),
            PredicateOp::IsNotNull => format!("{} IS NOT NULL", field),
        }
    }
}
