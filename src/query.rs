use tracing::warn;

use crate::error::{BuilderxError, Result};
use crate::traits::Renderable;
use crate::types::SqlValue;

/// What `select`, `get` and `exec` accept: literal SQL or a statement
/// builder.
///
/// Anything that converts into this enum is a valid query; builders and
/// string types get `From` impls.
#[derive(Clone, Copy)]
pub enum Query<'q> {
    /// SQL text used verbatim with the caller's arguments.
    Raw(&'q str),
    /// An object that renders its own SQL and arguments.
    Renderable(&'q dyn Renderable),
}

impl<'q> Query<'q> {
    /// Resolves to the `(sql, params)` pair that will be sent to the driver.
    ///
    /// A renderable query's own parameters are authoritative: `args` is
    /// dropped in that case.
    pub fn resolve(self, args: &[SqlValue]) -> Result<(String, Vec<SqlValue>)> {
        match self {
            Query::Renderable(builder) => {
                if !args.is_empty() {
                    warn!(
                        discarded = args.len(),
                        "arguments passed alongside a statement builder are ignored"
                    );
                }
                builder.to_sql()
            }
            Query::Raw(sql) if sql.trim().is_empty() => Err(BuilderxError::InvalidQuery(
                "SQL text is empty".to_string(),
            )),
            Query::Raw(sql) => Ok((sql.to_string(), args.to_vec())),
        }
    }
}

impl std::fmt::Debug for Query<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::Raw(sql) => f.debug_tuple("Raw").field(sql).finish(),
            Query::Renderable(_) => f.write_str("Renderable(..)"),
        }
    }
}

impl<'q> From<&'q str> for Query<'q> {
    fn from(sql: &'q str) -> Self {
        Query::Raw(sql)
    }
}

impl<'q> From<&'q String> for Query<'q> {
    fn from(sql: &'q String) -> Self {
        Query::Raw(sql.as_str())
    }
}

impl<'q> From<&'q dyn Renderable> for Query<'q> {
    fn from(builder: &'q dyn Renderable) -> Self {
        Query::Renderable(builder)
    }
}
