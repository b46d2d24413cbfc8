//! Result-set to struct mapping.
//!
//! Destination types declare their fields once through [`FromRow`]; columns
//! are matched by the connection's [`ColumnMapper`] (snake_case by default)
//! or by a field's explicit tag.

mod case;
mod record;
mod scan;

pub use case::{to_snake_case, ColumnMapper};
pub use record::{Assign, FieldMapping, FromColumn, FromRow};
pub use scan::ScanMode;

pub(crate) use record::TIMESTAMP_FORMAT;
pub(crate) use scan::RowScanner;
