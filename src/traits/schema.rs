use std::fmt;

/// A database table known at compile time.
/// Statement builders take one of these for their FROM / INTO target.
pub trait Table {
    /// The type containing all column accessors for this table.
    type Columns;

    /// Returns the table name as it appears in the database.
    fn table_name() -> &'static str;

    /// Returns the schema name, if any.
    fn schema() -> Option<&'static str> {
        None
    }

    /// Returns the fully qualified table name (schema.table or just table).
    fn qualified_name() -> String {
        match Self::schema() {
            Some(schema) => format!("{}.{}", schema, Self::table_name()),
            None => Self::table_name().to_string(),
        }
    }

    /// Returns an instance of the columns accessor for this table.
    fn columns() -> Self::Columns;
}

/// A column of a [`Table`].
pub trait Column {
    /// Returns the column name as it appears in the database.
    fn column_name(&self) -> &'static str;

    /// Returns the table name this column belongs to.
    fn table_name(&self) -> &'static str;

    /// Returns the fully qualified column name (table.column).
    fn qualified_name(&self) -> String {
        format!("{}.{}", self.table_name(), self.column_name())
    }
}

/// Owned copy of a column's identity, stored inside builders so they don't
/// borrow the caller's column accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn from_column<C: Column + ?Sized>(col: &C) -> Self {
        Self::new(col.table_name(), col.column_name())
    }

    /// Bare column name, as INSERT column lists and UPDATE SET targets need it.
    pub fn name(&self) -> &str {
        &self.column
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}
