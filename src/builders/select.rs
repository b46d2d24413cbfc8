use std::sync::Arc;

use crate::clauses::WhereClause;
use crate::error::Result;
use crate::query::Query;
use crate::traits::{Column, ColumnRef, DatabaseDriver, Renderable, Table};
use crate::types::{QueryResult, SqlValue};

use super::run_query;

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// Entry point for building a SELECT query.
/// Must call `.columns()` to proceed.
pub struct Select {
    driver: Arc<dyn DatabaseDriver>,
}

impl Select {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self { driver }
    }

    /// Specify the columns to select.
    pub fn columns(self, cols: &[&dyn Column]) -> SelectWithColumns {
        let columns = cols.iter().map(|c| ColumnRef::from_column(*c)).collect();
        SelectWithColumns {
            driver: self.driver,
            columns,
        }
    }
}

/// SELECT builder after columns have been specified.
/// Must call `.from()` to proceed.
pub struct SelectWithColumns {
    driver: Arc<dyn DatabaseDriver>,
    columns: Vec<ColumnRef>,
}

impl SelectWithColumns {
    /// Specify the table to select from.
    pub fn from<T: Table>(self, _table: T) -> SelectWithTable {
        SelectWithTable {
            driver: self.driver,
            columns: self.columns,
            table: T::qualified_name(),
            where_clause: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }
}

/// SELECT builder after table has been specified.
/// Can optionally add WHERE, ORDER BY, LIMIT and OFFSET, or run directly.
pub struct SelectWithTable {
    driver: Arc<dyn DatabaseDriver>,
    columns: Vec<ColumnRef>,
    table: String,
    where_clause: Option<WhereClause>,
    order_by: Vec<(ColumnRef, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SelectWithTable {
    /// Add a WHERE clause to the query.
    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.where_clause = Some(clause);
        self
    }

    /// Append an ORDER BY term. Terms apply in the order they are added.
    pub fn order_by<C: Column>(mut self, column: &C, order: Order) -> Self {
        self.order_by.push((ColumnRef::from_column(column), order));
        self
    }

    /// Add a LIMIT to the query.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Add an OFFSET to the query.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Build the SQL query string and parameters.
    fn build_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        let mut sql = String::with_capacity(256);
        let mut params = Vec::new();

        sql.push_str("SELECT ");
        let columns: Vec<String> = self.columns.iter().map(ColumnRef::qualified_name).collect();
        sql.push_str(&columns.join(", "));

        sql.push_str(" FROM ");
        sql.push_str(&self.table);

        if let Some(ref where_clause) = self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause.build_sql(&mut params)?);
        }

        if !self.order_by.is_empty() {
            let terms: Vec<String> = self
                .order_by
                .iter()
                .map(|(col, order)| match order {
                    Order::Asc => format!("{} ASC", col.qualified_name()),
                    Order::Desc => format!("{} DESC", col.qualified_name()),
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        Ok((sql, params))
    }

    /// Run the query on the bound connection and return its rows.
    pub async fn fetch(&self) -> Result<QueryResult> {
        let (sql, params) = self.build_sql()?;
        let raw_result = run_query(self.driver.as_ref(), &sql, &params).await?;
        Ok(QueryResult::from_raw(raw_result))
    }
}

impl Renderable for SelectWithTable {
    fn to_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        self.build_sql()
    }
}

impl<'q> From<&'q SelectWithTable> for Query<'q> {
    fn from(builder: &'q SelectWithTable) -> Self {
        Query::Renderable(builder)
    }
}
