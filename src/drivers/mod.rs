mod in_memory_test;
mod tokio_postgres;

use std::str::FromStr;

use crate::error::BuilderxError;

pub use self::in_memory_test::{
    InMemoryTestDriver, InMemoryTestResponseBuilder, RecordedQuery, StatementKind,
};
pub use self::tokio_postgres::TokioPostgresDriver;

/// Driver families `Database::connect` knows how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    Postgres,
}

impl FromStr for DriverKind {
    type Err = BuilderxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pgx" => Ok(DriverKind::Postgres),
            other => Err(BuilderxError::Connect(format!("unknown driver: {:?}", other))),
        }
    }
}
