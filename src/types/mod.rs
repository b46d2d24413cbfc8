mod row;
mod sql_value;

pub use row::{QueryResult, RawQueryResult, RawValue, Row};
pub use sql_value::SqlValue;
