use std::sync::Arc;

use crate::error::{BuilderxError, Result};
use crate::query::Query;
use crate::traits::{Column, ColumnRef, DatabaseDriver, Renderable, Table};
use crate::types::{QueryResult, SqlValue};

use super::{execute_statement, run_query};

/// INSERT builder after the target table has been chosen.
/// Must call `.columns()` to proceed.
pub struct Insert {
    driver: Arc<dyn DatabaseDriver>,
    table: String,
}

impl Insert {
    pub(crate) fn new<T: Table>(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self {
            driver,
            table: T::qualified_name(),
        }
    }

    /// Specify the columns every value row fills, in order.
    pub fn columns(self, cols: &[&dyn Column]) -> InsertWithColumns {
        InsertWithColumns {
            driver: self.driver,
            table: self.table,
            columns: cols.iter().map(|c| ColumnRef::from_column(*c)).collect(),
            rows: Vec::new(),
            returning: Vec::new(),
        }
    }
}

/// INSERT builder collecting value rows.
pub struct InsertWithColumns {
    driver: Arc<dyn DatabaseDriver>,
    table: String,
    columns: Vec<ColumnRef>,
    rows: Vec<Vec<SqlValue>>,
    returning: Vec<ColumnRef>,
}

impl InsertWithColumns {
    /// Append one row of values. The row length is checked at render time.
    pub fn values<I>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = SqlValue>,
    {
        self.rows.push(row.into_iter().collect());
        self
    }

    /// Add a RETURNING list; use `fetch` to read the returned rows.
    pub fn returning(mut self, cols: &[&dyn Column]) -> Self {
        self.returning = cols.iter().map(|c| ColumnRef::from_column(*c)).collect();
        self
    }

    fn build_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        if self.columns.is_empty() {
            return Err(BuilderxError::Resolution(format!(
                "INSERT into {} has no columns",
                self.table
            )));
        }
        if self.rows.is_empty() {
            return Err(BuilderxError::Resolution(format!(
                "INSERT into {} has no values",
                self.table
            )));
        }

        let mut params = Vec::with_capacity(self.columns.len() * self.rows.len());
        let mut tuples = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(BuilderxError::Resolution(format!(
                    "INSERT row {} has {} values for {} columns",
                    i,
                    row.len(),
                    self.columns.len()
                )));
            }
            let mut placeholders = Vec::with_capacity(row.len());
            for value in row {
                params.push(value.clone());
                placeholders.push(format!("${}", params.len()));
            }
            tuples.push(format!("({})", placeholders.join(", ")));
        }

        let columns: Vec<&str> = self.columns.iter().map(ColumnRef::name).collect();
        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            self.table,
            columns.join(", "),
            tuples.join(", ")
        );

        if !self.returning.is_empty() {
            let returning: Vec<&str> = self.returning.iter().map(ColumnRef::name).collect();
            sql.push_str(" RETURNING ");
            sql.push_str(&returning.join(", "));
        }

        Ok((sql, params))
    }

    /// Run the insert on the bound connection, returning the row count.
    pub async fn execute(&self) -> Result<u64> {
        let (sql, params) = self.build_sql()?;
        execute_statement(self.driver.as_ref(), &sql, &params).await
    }

    /// Run the insert and return the rows produced by its RETURNING list.
    pub async fn fetch(&self) -> Result<QueryResult> {
        let (sql, params) = self.build_sql()?;
        let raw_result = run_query(self.driver.as_ref(), &sql, &params).await?;
        Ok(QueryResult::from_raw(raw_result))
    }
}

impl Renderable for InsertWithColumns {
    fn to_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        self.build_sql()
    }
}

impl<'q> From<&'q InsertWithColumns> for Query<'q> {
    fn from(builder: &'q InsertWithColumns) -> Self {
        Query::Renderable(builder)
    }
}
