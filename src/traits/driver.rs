use async_trait::async_trait;

use crate::error::Result;
use crate::types::{RawQueryResult, SqlValue};

/// Trait for database driver implementations.
/// Drivers are responsible for:
/// - Opening the session and answering liveness checks
/// - Converting SqlValue parameters to native types
/// - Executing statements and converting results to RawQueryResult
///
/// Parameters use PostgreSQL-style placeholders ($1, $2, etc.)
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Lightweight round-trip confirming the session is usable.
    async fn ping(&self) -> Result<()>;

    /// Run a statement that returns rows.
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult>;

    /// Run a statement for its side effects, returning the affected row count.
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64>;
}
