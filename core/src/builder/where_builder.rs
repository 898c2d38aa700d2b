//! WHERE 条件构建

use crate::bind_value::BindValue;
use crate::condition::{OrCondition, Operator};
use crate::error::{Result, SqlStmtError};
use crate::macros_api::Record;
use crate::reflect::{Reflector, TagPolicy};
use crate::statement::{
    ConditionItem, ConditionType, Predicate, PredicateOp, Statement, StatementKind,
};

/// 支持 WHERE 的语句类型
const WHERE_KINDS: &[StatementKind] = &[
    StatementKind::Select,
    StatementKind::Update,
    StatementKind::Delete,
];

impl Statement {
    /// 通用条件入口：`field <op> ?`，与已有条件用 AND 连接
    ///
    /// `Operator::Unset` 返回 `InvalidPredicate`。
    pub fn where_condition(
        &mut self,
        field: &str,
        operator: Operator,
        value: impl Into<BindValue>,
    ) -> Result<&mut Self> {
        self.add_compare("where_condition", field, operator, value.into())
    }

    pub fn where_eq(&mut self, field: &str, value: impl Into<BindValue>) -> Result<&mut Self> {
        self.add_compare("where_eq", field, Operator::Eq, value.into())
    }

    pub fn where_ne(&mut self, field: &str, value: impl Into<BindValue>) -> Result<&mut Self> {
        self.add_compare("where_ne", field, Operator::Ne, value.into())
    }

    pub fn where_gt(&mut self, field: &str, value: impl Into<BindValue>) -> Result<&mut Self> {
        self.add_compare("where_gt", field, Operator::Gt, value.into())
    }

    pub fn where_ge(&mut self, field: &str, value: impl Into<BindValue>) -> Result<&mut Self> {
        self.add_compare("where_ge", field, Operator::Ge, value.into())
    }

    pub fn where_lt(&mut self, field: &str, value: impl Into<BindValue>) -> Result<&mut Self> {
        self.add_compare("where_lt", field, Operator::Lt, value.into())
    }

    pub fn where_le(&mut self, field: &str, value: impl Into<BindValue>) -> Result<&mut Self> {
        self.add_compare("where_le", field, Operator::Le, value.into())
    }

    /// LIKE 包含匹配（%value%）
    pub fn where_like(&mut self, field: &str, value: impl Into<BindValue>) -> Result<&mut Self> {
        self.add_compare("where_like", field, Operator::Like, value.into())
    }

    /// LIKE 前缀匹配（value%）
    pub fn where_like_prefix(
        &mut self,
        field: &str,
        value: impl Into<BindValue>,
    ) -> Result<&mut Self> {
        self.add_compare("where_like_prefix", field, Operator::LikePrefix, value.into())
    }

    /// LIKE 后缀匹配（%value）
    pub fn where_like_suffix(
        &mut self,
        field: &str,
        value: impl Into<BindValue>,
    ) -> Result<&mut Self> {
        self.add_compare("where_like_suffix", field, Operator::LikeSuffix, value.into())
    }

    /// IN 查询：`field IN (?,?,...)`
    ///
    /// 空列表返回 `EmptyArgumentList`；列表中的空字符串会被丢弃，
    /// 丢弃后为空同样返回 `EmptyArgumentList`。
    pub fn where_in<V: Into<BindValue>>(
        &mut self,
        field: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Result<&mut Self> {
        self.add_in("where_in", field, PredicateOp::In, values)
    }

    /// NOT IN 查询，规则同 `where_in`
    pub fn where_not_in<V: Into<BindValue>>(
        &mut self,
        field: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Result<&mut Self> {
        self.add_in("where_not_in", field, PredicateOp::NotIn, values)
    }

    /// BETWEEN 范围查询：`field BETWEEN ? AND ?`
    pub fn where_between(
        &mut self,
        field: &str,
        low: impl Into<BindValue>,
        high: impl Into<BindValue>,
    ) -> Result<&mut Self> {
        self.ensure_kind("where_between", WHERE_KINDS)?;
        self.push_and(Predicate {
            field: field.to_string(),
            op: PredicateOp::Between,
            binds: vec![low.into(), high.into()],
        });
        Ok(self)
    }

    /// IS NULL 查询
    pub fn where_is_null(&mut self, field: &str) -> Result<&mut Self> {
        self.ensure_kind("where_is_null", WHERE_KINDS)?;
        self.push_and(Predicate {
            field: field.to_string(),
            op: PredicateOp::IsNull,
            binds: Vec::new(),
        });
        Ok(self)
    }

    /// IS NOT NULL 查询
    pub fn where_is_not_null(&mut self, field: &str) -> Result<&mut Self> {
        self.ensure_kind("where_is_not_null", WHERE_KINDS)?;
        self.push_and(Predicate {
            field: field.to_string(),
            op: PredicateOp::IsNotNull,
            binds: Vec::new(),
        });
        Ok(self)
    }

    /// OR 条件分组
    ///
    /// 组内条件用 AND 连接，整组再以 `OR (...)` 接在已有条件之后：
    ///
    /// ```text
    /// where_eq(a) + where_or([b, c])            => `a`=? OR (`b`=? AND `c`=?)
    /// where_or([a, b])（此前无条件）            => `a`=? AND `b`=?
    /// where_eq(a) + where_or([b]) + where_or([c]) => `a`=? OR (`b`=?) OR (`c`=?)
    /// ```
    ///
    /// 第二次调用把之前的整个表达式作为左侧，已生成的部分不会被重新加括号。
    pub fn where_or(&mut self, conditions: Vec<OrCondition>) -> Result<&mut Self> {
        self.ensure_kind("where_or", WHERE_KINDS)?;
        if conditions.is_empty() {
            return Err(SqlStmtError::EmptyArgumentList("where_or"));
        }

        let mut group = Vec::with_capacity(conditions.len());
        for condition in conditions {
            let (op, value) = condition.operator.render(condition.value)?;
            group.push(Predicate {
                field: condition.field,
                op: PredicateOp::Compare(op),
                binds: vec![value],
            });
        }
        self.push_condition(ConditionItem::Group(group, ConditionType::Or));
        Ok(self)
    }

    /// 按结构体已标注字段逐个添加等值条件（保持字段声明顺序）
    ///
    /// 未标注字段跳过；`skip_empty` 为 true 时零值字段也跳过。
    pub fn where_by_struct<R: Record>(
        &mut self,
        record: &R,
        skip_empty: bool,
    ) -> Result<&mut Self> {
        self.ensure_kind("where_by_struct", WHERE_KINDS)?;
        let fields = Reflector::new(TagPolicy::Lenient)
            .with_skip_empty(skip_empty)
            .extract(record)?;
        for field in fields {
            self.push_eq(field.column, field.value);
        }
        Ok(self)
    }

    /// 追加 `field = value`，调用方已完成类型检查
    pub(crate) fn push_eq(&mut self, field: &str, value: BindValue) {
        self.push_and(Predicate {
            field: field.to_string(),
            op: PredicateOp::Compare("="),
            binds: vec![value],
        });
    }

    fn push_and(&mut self, predicate: Predicate) {
        self.push_condition(ConditionItem::Single(predicate, ConditionType::And));
    }

    fn add_compare(
        &mut self,
        operation: &'static str,
        field: &str,
        operator: Operator,
        value: BindValue,
    ) -> Result<&mut Self> {
        self.ensure_kind(operation, WHERE_KINDS)?;
        let (op, value) = operator.render(value)?;
        self.push_and(Predicate {
            field: field.to_string(),
            op: PredicateOp::Compare(op),
            binds: vec![value],
        });
        Ok(self)
    }

    fn add_in<V: Into<BindValue>>(
        &mut self,
        operation: &'static str,
        field: &str,
        op: PredicateOp,
        values: impl IntoIterator<Item = V>,
    ) -> Result<&mut Self> {
        self.ensure_kind(operation, WHERE_KINDS)?;
        let values: Vec<BindValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(SqlStmtError::EmptyArgumentList(operation));
        }
        let binds: Vec<BindValue> = values.into_iter().filter(|v| !v.is_empty_string()).collect();
        if binds.is_empty() {
            return Err(SqlStmtError::EmptyArgumentList(operation));
        }
        self.push_and(Predicate {
            field: field.to_string(),
            op,
            binds,
        });
        Ok(self)
    }
}
