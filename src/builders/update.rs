use std::sync::Arc;

use crate::clauses::WhereClause;
use crate::error::{BuilderxError, Result};
use crate::query::Query;
use crate::traits::{Column, ColumnRef, DatabaseDriver, Renderable, Table};
use crate::types::SqlValue;

use super::execute_statement;

/// UPDATE builder. At least one `.set()` is required before it renders.
pub struct Update {
    driver: Arc<dyn DatabaseDriver>,
    table: String,
    assignments: Vec<(ColumnRef, SqlValue)>,
    where_clause: Option<WhereClause>,
}

impl Update {
    pub(crate) fn new<T: Table>(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self {
            driver,
            table: T::qualified_name(),
            assignments: Vec::new(),
            where_clause: None,
        }
    }

    /// Add `column = value` to the SET list.
    pub fn set<C: Column, V: Into<SqlValue>>(mut self, column: &C, value: V) -> Self {
        self.assignments
            .push((ColumnRef::from_column(column), value.into()));
        self
    }

    /// Restrict the rows updated.
    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.where_clause = Some(clause);
        self
    }

    fn build_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        if self.assignments.is_empty() {
            return Err(BuilderxError::Resolution(format!(
                "UPDATE {} has no SET values",
                self.table
            )));
        }

        let mut params = Vec::new();
        let mut sets = Vec::with_capacity(self.assignments.len());
        for (col, value) in &self.assignments {
            params.push(value.clone());
            sets.push(format!("{} = ${}", col.name(), params.len()));
        }

        let mut sql = format!("UPDATE {} SET {}", self.table, sets.join(", "));

        if let Some(ref where_clause) = self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause.build_sql(&mut params)?);
        }

        Ok((sql, params))
    }

    /// Run the update on the bound connection, returning the row count.
    pub async fn execute(&self) -> Result<u64> {
        let (sql, params) = self.build_sql()?;
        execute_statement(self.driver.as_ref(), &sql, &params).await
    }
}

impl Renderable for Update {
    fn to_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        self.build_sql()
    }
}

impl<'q> From<&'q Update> for Query<'q> {
    fn from(builder: &'q Update) -> Self {
        Query::Renderable(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::test_schema::Users;
    use crate::drivers::InMemoryTestDriver;

    fn update() -> Update {
        Update::new::<Users>(Arc::new(InMemoryTestDriver::new()))
    }

    #[test]
    fn test_where_numbering_follows_set_list() {
        let builder = update()
            .set(&Users::columns().name, "Dee")
            .where_(WhereClause::eq(&Users::columns().id, 4));

        let (sql, params) = builder.build_sql().unwrap();
        assert_eq!(sql, "UPDATE users SET name = $1 WHERE users.id = $2");
        assert_eq!(
            params,
            vec![SqlValue::Text("Dee".to_string()), SqlValue::Int32(4)]
        );
    }

    #[test]
    fn test_update_without_set_fails_to_render() {
        let err = update().to_sql().unwrap_err();
        assert!(matches!(err, BuilderxError::Resolution(_)));
    }
}
