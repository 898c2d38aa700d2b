//! JSON 语句描述及其到 [`Statement`] 的转换

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use sqlstmt::{BindValue, BuilderConfig, OrCondition, Operator, Statement, StatementKind};

/// 一条语句的描述
///
/// ```json
/// {
///   "kind": "select",
///   "table": "skill",
///   "fields": "`id`,`name`",
///   "clauses": [
///     { "op": "eq", "field": "skill_type", "value": 1 },
///     { "op": "in", "field": "status", "values": [1, 2] },
///     { "op": "limit", "offset": 0, "size": 20 }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct StatementDescription {
    pub kind: StatementKind,
    pub table: String,
    /// SELECT 投影列，原样输出
    #[serde(default)]
    pub fields: Option<String>,
    #[serde(default)]
    pub clauses: Vec<Clause>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Clause {
    Eq { field: String, value: Value },
    Ne { field: String, value: Value },
    Gt { field: String, value: Value },
    Ge { field: String, value: Value },
    Lt { field: String, value: Value },
    Le { field: String, value: Value },
    Like { field: String, value: Value },
    LikePrefix { field: String, value: Value },
    LikeSuffix { field: String, value: Value },
    In { field: String, values: Vec<Value> },
    NotIn { field: String, values: Vec<Value> },
    Between { field: String, low: Value, high: Value },
    IsNull { field: String },
    IsNotNull { field: String },
    Or { conditions: Vec<OrItem> },
    Set { field: String, value: Value },
    /// 按顺序给出的 `[列, 值]`
    Insert { row: Vec<(String, Value)> },
    Limit { offset: u64, size: u64 },
    GroupBy { fields: String },
    OrderBy { fields: String },
}

#[derive(Debug, Deserialize)]
pub struct OrItem {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

fn bind(value: Value) -> Result<BindValue> {
    Ok(BindValue::try_from(value)?)
}

fn bind_all(values: Vec<Value>) -> Result<Vec<BindValue>> {
    values.into_iter().map(bind).collect()
}

impl StatementDescription {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse statement description")
    }

    /// 依次应用所有子句，任一子句失败时带上其序号返回
    pub fn build(self, config: BuilderConfig) -> Result<Statement> {
        let mut stmt = Statement::new(self.table, self.kind).with_config(config);
        if let Some(fields) = &self.fields {
            stmt.set_projected_fields(fields)?;
        }
        for (index, clause) in self.clauses.into_iter().enumerate() {
            apply(&mut stmt, clause).with_context(|| format!("clause #{} failed", index))?;
        }
        Ok(stmt)
    }
}

fn apply(stmt: &mut Statement, clause: Clause) -> Result<()> {
    match clause {
        Clause::Eq { field, value } => compare(stmt, &field, Operator::Eq, value)?,
        Clause::Ne { field, value } => compare(stmt, &field, Operator::Ne, value)?,
        Clause::Gt { field, value } => compare(stmt, &field, Operator::Gt, value)?,
        Clause::Ge { field, value } => compare(stmt, &field, Operator::Ge, value)?,
        Clause::Lt { field, value } => compare(stmt, &field, Operator::Lt, value)?,
        Clause::Le { field, value } => compare(stmt, &field, Operator::Le, value)?,
        Clause::Like { field, value } => compare(stmt, &field, Operator::Like, value)?,
        Clause::LikePrefix { field, value } => compare(stmt, &field, Operator::LikePrefix, value)?,
        Clause::LikeSuffix { field, value } => compare(stmt, &field, Operator::LikeSuffix, value)?,
        Clause::In { field, values } => {
            stmt.where_in(&field, bind_all(values)?)?;
        }
        Clause::NotIn { field, values } => {
            stmt.where_not_in(&field, bind_all(values)?)?;
        }
        Clause::Between { field, low, high } => {
            stmt.where_between(&field, bind(low)?, bind(high)?)?;
        }
        Clause::IsNull { field } => {
            stmt.where_is_null(&field)?;
        }
        Clause::IsNotNull { field } => {
            stmt.where_is_not_null(&field)?;
        }
        Clause::Or { conditions } => {
            let conditions = conditions
                .into_iter()
                .map(|c| Ok(OrCondition::new(c.field, c.operator, bind(c.value)?)))
                .collect::<Result<Vec<_>>>()?;
            stmt.where_or(conditions)?;
        }
        Clause::Set { field, value } => {
            stmt.update_set(&field, bind(value)?)?;
        }
        Clause::Insert { row } => {
            let row = row
                .into_iter()
                .map(|(column, value)| Ok((column, bind(value)?)))
                .collect::<Result<Vec<_>>>()?;
            stmt.insert_row(row)?;
        }
        Clause::Limit { offset, size } => {
            stmt.limit(offset, size)?;
        }
        Clause::GroupBy { fields } => {
            stmt.group_by(&fields)?;
        }
        Clause::OrderBy { fields } => {
            stmt.order_by(&fields)?;
        }
    }
    Ok(())
}

fn compare(stmt: &mut Statement, field: &str, operator: Operator, value: Value) -> Result<()> {
    stmt.where_condition(field, operator, bind(value)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlstmt::Placeholder;

    #[test]
    fn test_build_select() {
        let json = r#"{
            "kind": "select",
            "table": "skill",
            "fields": "`condition`,`skill_type`",
            "clauses": [
                { "op": "eq", "field": "skill_type", "value": 1 },
                { "op": "in", "field": "status", "values": [1, 2] },
                { "op": "or", "conditions": [
                    { "field": "desc", "operator": "like_prefix", "value": "abc" },
                    { "field": "desc", "operator": "like_suffix", "value": "abc" }
                ] },
                { "op": "order_by", "fields": "`id` DESC" },
                { "op": "limit", "offset": 0, "size": 20 }
            ]
        }"#;
        let stmt = StatementDescription::from_json_str(json)
            .unwrap()
            .build(BuilderConfig::default())
            .unwrap();
        assert_eq!(
            stmt.to_sql(),
            "SELECT `condition`,`skill_type` FROM `skill` WHERE `skill_type`=? AND `status` IN (?,?) OR (`desc` LIKE ? AND `desc` LIKE ?) ORDER BY `id` DESC LIMIT 0,20;"
        );
        assert_eq!(
            stmt.args(),
            vec![
                BindValue::Int64(1),
                BindValue::Int64(1),
                BindValue::Int64(2),
                BindValue::from("abc%"),
                BindValue::from("%abc"),
            ]
        );
    }

    #[test]
    fn test_build_insert_with_numbered_placeholder() {
        let json = r#"{
            "kind": "insert",
            "table": "tag",
            "clauses": [
                { "op": "insert", "row": [["name", "rust"], ["weight", 3], ["note", null]] }
            ]
        }"#;
        let config = BuilderConfig {
            placeholder: Placeholder::Numbered("$".to_string()),
            quote_identifiers: false,
        };
        let stmt = StatementDescription::from_json_str(json)
            .unwrap()
            .build(config)
            .unwrap();
        assert_eq!(stmt.to_sql(), "INSERT INTO tag(name,weight,note) VALUES($1,$2,$3);");
        assert_eq!(
            stmt.args(),
            vec![BindValue::from("rust"), BindValue::Int64(3), BindValue::Null]
        );
    }

    #[test]
    fn test_clause_on_wrong_kind_fails() {
        let json = r#"{
            "kind": "delete",
            "table": "skill",
            "clauses": [ { "op": "set", "field": "a", "value": 1 } ]
        }"#;
        let err = StatementDescription::from_json_str(json)
            .unwrap()
            .build(BuilderConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("clause #0"));
    }

    #[test]
    fn test_non_scalar_value_rejected() {
        let json = r#"{
            "kind": "select",
            "table": "skill",
            "clauses": [ { "op": "eq", "field": "a", "value": [1] } ]
        }"#;
        assert!(StatementDescription::from_json_str(json)
            .unwrap()
            .build(BuilderConfig::default())
            .is_err());
    }

    #[test]
    fn test_unknown_op_rejected() {
        let json = r#"{ "kind": "select", "table": "t", "clauses": [ { "op": "xor" } ] }"#;
        assert!(StatementDescription::from_json_str(json).is_err());
    }
}
