//! Statement builders bound to a connection.
//!
//! Every builder renders dollar-numbered placeholders (`$1`, `$2`, ...) and
//! can run itself through the driver it was created from, or be handed to
//! [`Database::select`](crate::Database::select) and friends as a query.

mod delete;
mod insert;
mod select;
mod update;

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::traits::{DatabaseDriver, Table};
use crate::types::{RawQueryResult, SqlValue};

pub use delete::Delete;
pub use insert::{Insert, InsertWithColumns};
pub use select::{Order, Select, SelectWithColumns, SelectWithTable};
pub use update::Update;

/// Factory for statement builders that execute on one connection.
/// Obtained from [`Database::builder`](crate::Database::builder).
#[derive(Clone)]
pub struct StatementBuilder {
    driver: Arc<dyn DatabaseDriver>,
}

impl StatementBuilder {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self { driver }
    }

    /// Start building a SELECT query.
    pub fn select(&self) -> Select {
        Select::new(Arc::clone(&self.driver))
    }

    /// Start building an INSERT into `T`.
    pub fn insert<T: Table>(&self, _table: T) -> Insert {
        Insert::new::<T>(Arc::clone(&self.driver))
    }

    /// Start building an UPDATE of `T`.
    pub fn update<T: Table>(&self, _table: T) -> Update {
        Update::new::<T>(Arc::clone(&self.driver))
    }

    /// Start building a DELETE from `T`.
    pub fn delete<T: Table>(&self, _table: T) -> Delete {
        Delete::new::<T>(Arc::clone(&self.driver))
    }
}

pub(crate) async fn run_query(
    driver: &dyn DatabaseDriver,
    sql: &str,
    params: &[SqlValue],
) -> Result<RawQueryResult> {
    debug!(sql, params = params.len(), "query");
    driver.query(sql, params).await
}

pub(crate) async fn execute_statement(
    driver: &dyn DatabaseDriver,
    sql: &str,
    params: &[SqlValue],
) -> Result<u64> {
    debug!(sql, params = params.len(), "execute");
    driver.execute(sql, params).await
}
