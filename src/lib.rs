//! builderx - one interface over literal SQL and statement builders
//!
//! # Example
//! ```ignore
//! use builderx::{record, Database, SqlValue, WhereClause};
//!
//! #[derive(Debug, Default)]
//! struct User {
//!     id: i32,
//!     name: String,
//! }
//! record!(User { id, name });
//!
//! let db = Database::connect("postgres", "postgres://localhost/mydb").await?;
//!
//! // Literal SQL with positional arguments
//! let mut user = User::default();
//! db.get(&mut user, "SELECT id, name FROM users WHERE id = $1", &[SqlValue::from(1)])
//!     .await?;
//!
//! // The same through a statement builder
//! let query = db
//!     .builder()
//!     .select()
//!     .columns(&[&Users::columns().id, &Users::columns().name])
//!     .from(Users)
//!     .where_(WhereClause::eq(&Users::columns().name, "John"));
//! let mut users = Vec::new();
//! db.select(&mut users, &query, &[]).await?;
//! ```

pub mod builders;
pub mod clauses;
pub mod config;
pub mod drivers;
pub mod error;
pub mod mapping;
pub mod query;
pub mod traits;
pub mod types;

mod database;

// Re-export main types for convenient access
pub use builders::StatementBuilder;
pub use clauses::WhereClause;
pub use config::ConnectConfig;
pub use database::Database;
pub use error::{BuilderxError, Result};
pub use mapping::{ColumnMapper, FieldMapping, FromColumn, FromRow, ScanMode};
pub use query::Query;
pub use traits::{Column, ColumnRef, DatabaseDriver, Renderable, Table};
pub use types::{QueryResult, RawQueryResult, RawValue, Row, SqlValue};
