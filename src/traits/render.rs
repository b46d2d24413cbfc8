use crate::error::Result;
use crate::types::SqlValue;

/// An object that can turn itself into SQL text plus its positional
/// parameters. Every statement builder implements this.
pub trait Renderable: Send + Sync {
    /// Render to `(sql, params)`. Placeholders are numbered `$1, $2, ...`
    /// in the same order as `params`.
    fn to_sql(&self) -> Result<(String, Vec<SqlValue>)>;
}
