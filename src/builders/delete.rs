use std::sync::Arc;

use crate::clauses::WhereClause;
use crate::error::Result;
use crate::query::Query;
use crate::traits::{DatabaseDriver, Renderable, Table};
use crate::types::SqlValue;

use super::execute_statement;

/// DELETE builder. Without a WHERE clause every row of the table goes.
pub struct Delete {
    driver: Arc<dyn DatabaseDriver>,
    table: String,
    where_clause: Option<WhereClause>,
}

impl Delete {
    pub(crate) fn new<T: Table>(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self {
            driver,
            table: T::qualified_name(),
            where_clause: None,
        }
    }

    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.where_clause = Some(clause);
        self
    }

    fn build_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        let mut params = Vec::new();
        let mut sql = format!("DELETE FROM {}", self.table);

        if let Some(ref where_clause) = self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause.build_sql(&mut params)?);
        }

        Ok((sql, params))
    }

    /// Run the delete on the bound connection, returning the row count.
    pub async fn execute(&self) -> Result<u64> {
        let (sql, params) = self.build_sql()?;
        execute_statement(self.driver.as_ref(), &sql, &params).await
    }
}

impl Renderable for Delete {
    fn to_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        self.build_sql()
    }
}

impl<'q> From<&'q Delete> for Query<'q> {
    fn from(builder: &'q Delete) -> Self {
        Query::Renderable(builder)
    }
}
