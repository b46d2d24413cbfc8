use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

/// Text form the Postgres backend uses for `timestamp` columns.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Decodes one result-set value (driver text, `None` for SQL NULL) into a
/// Rust value.
pub trait FromColumn: Sized {
    fn from_column(raw: Option<&str>) -> Result<Self, String>;
}

macro_rules! from_column_parse {
    ($($ty:ty),*) => {
        $(
            impl FromColumn for $ty {
                fn from_column(raw: Option<&str>) -> Result<Self, String> {
                    let text = raw.ok_or_else(|| {
                        format!("NULL cannot be stored in {}", stringify!($ty))
                    })?;
                    text.trim()
                        .parse()
                        .map_err(|e| format!("invalid {} {:?}: {}", stringify!($ty), text, e))
                }
            }
        )*
    };
}

from_column_parse!(i16, i32, i64, f32, f64);

impl FromColumn for String {
    fn from_column(raw: Option<&str>) -> Result<Self, String> {
        raw.map(str::to_string)
            .ok_or_else(|| "NULL cannot be stored in String".to_string())
    }
}

impl FromColumn for bool {
    fn from_column(raw: Option<&str>) -> Result<Self, String> {
        match raw {
            Some("t" | "true" | "TRUE" | "1") => Ok(true),
            Some("f" | "false" | "FALSE" | "0") => Ok(false),
            Some(other) => Err(format!("invalid bool {:?}", other)),
            None => Err("NULL cannot be stored in bool".to_string()),
        }
    }
}

impl<T: FromColumn> FromColumn for Option<T> {
    fn from_column(raw: Option<&str>) -> Result<Self, String> {
        match raw {
            Some(_) => T::from_column(raw).map(Some),
            None => Ok(None),
        }
    }
}

fn non_null<'a>(raw: Option<&'a str>, ty: &str) -> Result<&'a str, String> {
    raw.ok_or_else(|| format!("NULL cannot be stored in {}", ty))
}

impl FromColumn for DateTime<Utc> {
    fn from_column(raw: Option<&str>) -> Result<Self, String> {
        let text = non_null(raw, "DateTime<Utc>")?;
        DateTime::parse_from_rfc3339(text)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| format!("invalid timestamp {:?}: {}", text, e))
    }
}

impl FromColumn for NaiveDateTime {
    fn from_column(raw: Option<&str>) -> Result<Self, String> {
        let text = non_null(raw, "NaiveDateTime")?;
        NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
            .or_else(|_| text.parse())
            .map_err(|e| format!("invalid timestamp {:?}: {}", text, e))
    }
}

impl FromColumn for NaiveDate {
    fn from_column(raw: Option<&str>) -> Result<Self, String> {
        let text = non_null(raw, "NaiveDate")?;
        text.parse()
            .map_err(|e| format!("invalid date {:?}: {}", text, e))
    }
}

impl FromColumn for NaiveTime {
    fn from_column(raw: Option<&str>) -> Result<Self, String> {
        let text = non_null(raw, "NaiveTime")?;
        text.parse()
            .map_err(|e| format!("invalid time {:?}: {}", text, e))
    }
}

impl FromColumn for Uuid {
    fn from_column(raw: Option<&str>) -> Result<Self, String> {
        let text = non_null(raw, "Uuid")?;
        Uuid::parse_str(text.trim()).map_err(|e| format!("invalid uuid {:?}: {}", text, e))
    }
}

/// JSON documents arrive as their serialized text.
impl FromColumn for serde_json::Value {
    fn from_column(raw: Option<&str>) -> Result<Self, String> {
        let text = non_null(raw, "serde_json::Value")?;
        serde_json::from_str(text).map_err(|e| format!("invalid json: {}", e))
    }
}

/// Writes one decoded column into a destination record.
pub type Assign<T> = fn(&mut T, Option<&str>) -> Result<(), String>;

/// One field of a destination record: its name, an optional column
/// override, and how to store a column value into it.
pub struct FieldMapping<T> {
    name: &'static str,
    tag: Option<&'static str>,
    assign: Assign<T>,
}

impl<T> FieldMapping<T> {
    pub fn new(name: &'static str, assign: Assign<T>) -> Self {
        Self {
            name,
            tag: None,
            assign,
        }
    }

    /// Reads from `column` verbatim instead of the mapped field name.
    pub fn tagged(mut self, column: &'static str) -> Self {
        self.tag = Some(column);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    pub(crate) fn assign(&self) -> Assign<T> {
        self.assign
    }
}

/// A type rows can be scanned into.
///
/// The schema is declared statically: `fields` lists every mapped field once.
/// Fields without a matching column keep their `Default` value under lenient
/// scanning. Most impls come from the [`record!`](crate::record) macro.
pub trait FromRow: Default {
    fn fields() -> Vec<FieldMapping<Self>>;
}

/// Implements [`FromRow`] for a struct with named fields.
///
/// Each listed field maps to its snake_case column; `field => "column"`
/// reads from an explicit column instead.
///
/// ```
/// #[derive(Debug, Default)]
/// struct Account {
///     id: i64,
///     display_name: String,
///     email: Option<String>,
/// }
///
/// builderx::record!(Account {
///     id,
///     display_name,
///     email => "email_address",
/// });
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ident { $($field:ident $(=> $tag:literal)?),* $(,)? }) => {
        impl $crate::mapping::FromRow for $ty {
            fn fields() -> ::std::vec::Vec<$crate::mapping::FieldMapping<Self>> {
                ::std::vec![$(
                    $crate::mapping::FieldMapping::new(
                        ::std::stringify!($field),
                        |rec: &mut $ty, raw: ::std::option::Option<&str>| {
                            rec.$field = $crate::mapping::FromColumn::from_column(raw)?;
                            ::std::result::Result::Ok(())
                        },
                    )$(.tagged($tag))?
                ),*]
            }
        }
    };
}
