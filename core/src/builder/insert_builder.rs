//! INSERT 构建

use crate::bind_value::BindValue;
use crate::error::{Result, SqlStmtError};
use crate::macros_api::Record;
use crate::reflect::{Reflector, TagPolicy};
use crate::statement::{Statement, StatementKind};

impl Statement {
    /// 设置要插入的 (列, 值)，替换之前设置的行
    pub fn insert_row<K, V>(&mut self, row: impl IntoIterator<Item = (K, V)>) -> Result<&mut Self>
    where
        K: Into<String>,
        V: Into<BindValue>,
    {
        self.ensure_kind("insert_row", &[StatementKind::Insert])?;
        let row: Vec<(String, BindValue)> = row
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .collect();
        if row.is_empty() {
            return Err(SqlStmtError::EmptyArgumentList("insert_row"));
        }
        self.insert_row = row;
        Ok(self)
    }

    /// 由结构体全部字段生成 `INSERT INTO table(cols) VALUES(?,...)`
    ///
    /// 所有字段都必须有列名标注，否则返回 `MissingFieldTag`；零值字段照常插入。
    pub fn insert_by_struct<R: Record>(&mut self, record: &R) -> Result<&mut Self> {
        self.ensure_kind("insert_by_struct", &[StatementKind::Insert])?;
        let fields = Reflector::new(TagPolicy::Strict).extract(record)?;
        if fields.is_empty() {
            return Err(SqlStmtError::EmptyArgumentList("insert_by_struct"));
        }
        self.insert_row = fields
            .into_iter()
            .map(|f| (f.column.to_string(), f.value))
            .collect();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macros_api::FieldMeta;
    use crate::reflect::tests::sample_skill;

    struct Tag {
        name: String,
        weight: i32,
        active: bool,
    }

    impl Record for Tag {
        const TABLE: &'static str = "tag";
        const FIELDS: &'static [FieldMeta] = &[
            FieldMeta { name: "name", column: Some("name") },
            FieldMeta { name: "weight", column: Some("weight") },
            FieldMeta { name: "active", column: Some("is_active") },
        ];

        fn field_value(&self, name: &str) -> Option<BindValue> {
            match name {
                "name" => Some(self.name.clone().into()),
                "weight" => Some(self.weight.into()),
                "active" => Some(self.active.into()),
                _ => None,
            }
        }
    }

    #[test]
    fn test_insert_by_struct() {
        let tag = Tag {
            name: "rust".to_string(),
            weight: 0,
            active: true,
        };
        let mut stmt = Statement::insert("tag");
        stmt.insert_by_struct(&tag).unwrap();
        assert_eq!(
            stmt.to_sql(),
            "INSERT INTO `tag`(`name`,`weight`,`is_active`) VALUES(?,?,?);"
        );
        assert_eq!(
            stmt.args(),
            vec![BindValue::from("rust"), BindValue::Int32(0), BindValue::Bool(true)]
        );
    }

    #[test]
    fn test_insert_by_struct_requires_tags() {
        let mut stmt = Statement::insert("skill");
        let err = stmt.insert_by_struct(&sample_skill()).unwrap_err();
        assert_eq!(
            err,
            SqlStmtError::MissingFieldTag {
                record: "skill",
                field: "empty"
            }
        );
        assert_eq!(stmt.to_sql(), "");
        assert!(stmt.args().is_empty());
    }

    #[test]
    fn test_insert_row() {
        let mut stmt = Statement::insert("t");
        stmt.insert_row(vec![("a", BindValue::from(1i64)), ("b", BindValue::from("x"))])
            .unwrap();
        assert_eq!(stmt.to_sql(), "INSERT INTO `t`(`a`,`b`) VALUES(?,?);");
        assert_eq!(stmt.args(), vec![BindValue::Int64(1), BindValue::from("x")]);

        let err = stmt
            .insert_row(Vec::<(&str, BindValue)>::new())
            .unwrap_err();
        assert_eq!(err, SqlStmtError::EmptyArgumentList("insert_row"));
        assert_eq!(stmt.args().len(), 2);
    }

    #[test]
    fn test_insert_on_update_is_rejected() {
        let mut stmt = Statement::update("t");
        let err = stmt.insert_row(vec![("a", 1i64)]).unwrap_err();
        assert_eq!(
            err,
            SqlStmtError::WrongStatementKind {
                operation: "insert_row",
                kind: StatementKind::Update,
            }
        );
    }
}
