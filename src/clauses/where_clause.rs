use crate::error::{BuilderxError, Result};
use crate::traits::{Column, ColumnRef};
use crate::types::SqlValue;

/// Comparison operators usable in a [`WhereClause::Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// Represents a WHERE clause condition.
/// Supports comparisons, IN lists, NULL checks and logical combinations.
#[derive(Debug, Clone)]
pub enum WhereClause {
    /// column <op> value
    Compare(ColumnRef, CompareOp, SqlValue),
    /// column IN (values...)
    In(ColumnRef, Vec<SqlValue>),
    /// column IS NULL
    IsNull(ColumnRef),
    /// column IS NOT NULL
    IsNotNull(ColumnRef),
    /// clause AND clause
    And(Box<WhereClause>, Box<WhereClause>),
    /// clause OR clause
    Or(Box<WhereClause>, Box<WhereClause>),
}

impl WhereClause {
    fn compare<C: Column, V: Into<SqlValue>>(column: &C, op: CompareOp, value: V) -> Self {
        WhereClause::Compare(ColumnRef::from_column(column), op, value.into())
    }

    /// column = value
    pub fn eq<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    /// column <> value
    pub fn ne<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        Self::compare(column, CompareOp::Ne, value)
    }

    /// column < value
    pub fn lt<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        Self::compare(column, CompareOp::Lt, value)
    }

    /// column <= value
    pub fn le<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        Self::compare(column, CompareOp::Le, value)
    }

    /// column > value
    pub fn gt<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        Self::compare(column, CompareOp::Gt, value)
    }

    /// column >= value
    pub fn ge<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        Self::compare(column, CompareOp::Ge, value)
    }

    /// column IN (values...). An empty list fails at render time.
    pub fn in_list<C, V, I>(column: &C, values: I) -> Self
    where
        C: Column,
        V: Into<SqlValue>,
        I: IntoIterator<Item = V>,
    {
        WhereClause::In(
            ColumnRef::from_column(column),
            values.into_iter().map(Into::into).collect(),
        )
    }

    pub fn is_null<C: Column>(column: &C) -> Self {
        WhereClause::IsNull(ColumnRef::from_column(column))
    }

    pub fn is_not_null<C: Column>(column: &C) -> Self {
        WhereClause::IsNotNull(ColumnRef::from_column(column))
    }

    /// Combines this clause with another using AND
    pub fn and(self, other: WhereClause) -> Self {
        WhereClause::And(Box::new(self), Box::new(other))
    }

    /// Combines this clause with another using OR
    pub fn or(self, other: WhereClause) -> Self {
        WhereClause::Or(Box::new(self), Box::new(other))
    }

    /// Builds the SQL fragment, appending bound values to `params`.
    /// Placeholder numbers continue from whatever `params` already holds, so
    /// a clause rendered after a SET list picks up where that list stopped.
    pub fn build_sql(&self, params: &mut Vec<SqlValue>) -> Result<String> {
        match self {
            WhereClause::Compare(col, op, value) => {
                params.push(value.clone());
                Ok(format!(
                    "{} {} ${}",
                    col.qualified_name(),
                    op.as_sql(),
                    params.len()
                ))
            }
            WhereClause::In(col, values) => {
                if values.is_empty() {
                    return Err(BuilderxError::Resolution(format!(
                        "IN list for {} is empty",
                        col
                    )));
                }
                let mut placeholders = Vec::with_capacity(values.len());
                for value in values {
                    params.push(value.clone());
                    placeholders.push(format!("${}", params.len()));
                }
                Ok(format!(
                    "{} IN ({})",
                    col.qualified_name(),
                    placeholders.join(", ")
                ))
            }
            WhereClause::IsNull(col) => Ok(format!("{} IS NULL", col.qualified_name())),
            WhereClause::IsNotNull(col) => Ok(format!("{} IS NOT NULL", col.qualified_name())),
            WhereClause::And(left, right) => {
                let left_sql = left.build_sql(params)?;
                let right_sql = right.build_sql(params)?;
                Ok(format!("({}) AND ({})", left_sql, right_sql))
            }
            WhereClause::Or(left, right) => {
                let left_sql = left.build_sql(params)?;
                let right_sql = right.build_sql(params)?;
                Ok(format!("({}) OR ({})", left_sql, right_sql))
            }
        }
    }
}
