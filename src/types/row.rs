use crate::{
    error::{BuilderxError, Result},
    Column,
};

/// One cell of a driver result.
///
/// Drivers hand back text. A cell the driver could not turn into text keeps
/// its error here, and the error only surfaces if something reads the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Null,
    Text(String),
    Undecodable(String),
}

impl RawValue {
    /// The cell as text, `None` for NULL, or the deferred decode error.
    pub fn as_text(&self) -> std::result::Result<Option<&str>, &str> {
        match self {
            RawValue::Null => Ok(None),
            RawValue::Text(s) => Ok(Some(s.as_str())),
            RawValue::Undecodable(reason) => Err(reason.as_str()),
        }
    }
}

impl From<Option<String>> for RawValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(RawValue::Null, RawValue::Text)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// Driver-agnostic raw result from a database query.
#[derive(Debug, Clone, Default)]
pub struct RawQueryResult {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, where each row holds the values in column order
    pub rows: Vec<Vec<RawValue>>,
}

impl RawQueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<RawValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// A single row result from a query.
/// Values keep the column order of the result set.
#[derive(Debug, Clone)]
pub struct Row {
    values: Vec<(String, RawValue)>,
}

impl Row {
    /// Creates a new Row from column names and values.
    pub(crate) fn new(columns: &[String], values: Vec<RawValue>) -> Self {
        let values = columns.iter().cloned().zip(values).collect();
        Self { values }
    }

    /// Gets a value by column. `Ok(None)` means the column holds NULL.
    pub fn get<T: Column + ?Sized>(&self, column: &T) -> Result<Option<&str>> {
        self.lookup(column.column_name(), || column.qualified_name())
    }

    /// Gets a value by result-set column name.
    pub fn get_by_name(&self, name: &str) -> Result<Option<&str>> {
        self.lookup(name, || name.to_string())
    }

    fn lookup(&self, name: &str, display: impl Fn() -> String) -> Result<Option<&str>> {
        let (_, value) = self
            .values
            .iter()
            .find(|(col, _)| col == name)
            .ok_or_else(|| BuilderxError::Execution(format!("column not found: {}", display())))?;
        value.as_text().map_err(|reason| {
            BuilderxError::Execution(format!("column {}: {}", display(), reason))
        })
    }

    /// Returns all column names in this row, in result-set order.
    pub fn columns(&self) -> Vec<&str> {
        self.values.iter().map(|(col, _)| col.as_str()).collect()
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of a query execution, containing zero or more rows.
#[derive(Debug)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl QueryResult {
    /// Creates a QueryResult from a RawQueryResult.
    pub fn from_raw(raw: RawQueryResult) -> Self {
        let rows = raw
            .rows
            .into_iter()
            .map(|values| Row::new(&raw.columns, values))
            .collect();
        Self {
            columns: raw.columns,
            rows,
        }
    }

    /// Extracts a single row from the result.
    /// Returns `NoRows` on an empty result and an execution error when more
    /// than one row came back.
    pub fn single_row(self) -> Result<Row> {
        let actual = self.rows.len();
        let mut rows = self.rows.into_iter();
        match (rows.next(), actual) {
            (None, _) => Err(BuilderxError::NoRows),
            (Some(row), 1) => Ok(row),
            (Some(_), n) => Err(BuilderxError::Execution(format!(
                "expected 1 row, got {}",
                n
            ))),
        }
    }

    /// Returns all rows from the result.
    pub fn rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns a reference to the rows without consuming the result.
    pub fn rows_ref(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the column names from this result.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of rows in this result.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if this result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
