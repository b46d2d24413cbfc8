use serde::{Deserialize, Serialize};

use super::case::ColumnMapper;
use super::record::{Assign, FromRow};
use crate::error::{BuilderxError, Result};
use crate::types::RawValue;

/// How strictly result columns must line up with destination fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Unmatched columns are ignored and unmatched fields keep their default.
    #[default]
    Lenient,
    /// Any column without a field, or field without a column, is an error.
    Strict,
}

/// Column-to-field plan for one result set, resolved once and then applied
/// to every row.
///
/// A field reads the first column carrying its name. Later columns with the
/// same name, as a join returning two `id` columns produces, count as
/// matched too and are never read.
pub(crate) struct RowScanner<T> {
    targets: Vec<(usize, String, Assign<T>)>,
}

impl<T: FromRow> RowScanner<T> {
    pub(crate) fn new(columns: &[String], mapper: &ColumnMapper, mode: ScanMode) -> Result<Self> {
        let mut matched = vec![false; columns.len()];
        let mut targets = Vec::new();

        for field in T::fields() {
            let column = mapper.column_for(&field);
            match columns.iter().position(|c| *c == column) {
                Some(idx) => {
                    for (seen, c) in matched.iter_mut().zip(columns) {
                        if *c == column {
                            *seen = true;
                        }
                    }
                    targets.push((idx, column, field.assign()));
                }
                None if mode == ScanMode::Strict => {
                    return Err(BuilderxError::Execution(format!(
                        "missing column {:?} for field {}",
                        column,
                        field.name()
                    )));
                }
                None => {}
            }
        }

        if mode == ScanMode::Strict {
            if let Some(idx) = matched.iter().position(|m| !m) {
                return Err(BuilderxError::Execution(format!(
                    "column {:?} has no destination field",
                    columns[idx]
                )));
            }
        }

        Ok(Self { targets })
    }

    /// Only mapped cells are read, so an undecodable cell in an unmapped
    /// column never fails the scan.
    pub(crate) fn scan(&self, values: &[RawValue]) -> Result<T> {
        let mut record = T::default();
        for (idx, column, assign) in &self.targets {
            let raw = match values.get(*idx) {
                Some(value) => value.as_text().map_err(|reason| {
                    BuilderxError::Execution(format!("scan column {:?}: {}", column, reason))
                })?,
                None => None,
            };
            assign(&mut record, raw).map_err(|e| {
                BuilderxError::Execution(format!("scan column {:?}: {}", column, e))
            })?;
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Member {
        user_id: i64,
        name: String,
        email: Option<String>,
    }

    crate::record!(Member { user_id, name, email => "mail" });

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lenient_ignores_extra_columns_and_missing_fields() {
        let cols = columns(&["user_id", "created_at"]);
        let scanner =
            RowScanner::<Member>::new(&cols, &ColumnMapper::snake_case(), ScanMode::Lenient)
                .unwrap();

        let member = scanner
            .scan(&[RawValue::from("9"), RawValue::from("2024-01-01")])
            .unwrap();
        assert_eq!(
            member,
            Member {
                user_id: 9,
                name: String::new(),
                email: None,
            }
        );
    }

    #[test]
    fn test_strict_rejects_unmatched_column() {
        let cols = columns(&["user_id", "name", "mail", "extra"]);
        let err = RowScanner::<Member>::new(&cols, &ColumnMapper::snake_case(), ScanMode::Strict)
            .err()
            .unwrap();
        assert!(err.to_string().contains("extra"));
    }

    #[test]
    fn test_strict_rejects_missing_field_column() {
        let cols = columns(&["user_id", "name"]);
        let err = RowScanner::<Member>::new(&cols, &ColumnMapper::snake_case(), ScanMode::Strict)
            .err()
            .unwrap();
        assert!(err.to_string().contains("mail"));
    }

    #[test]
    fn test_decode_failure_is_execution_error() {
        let cols = columns(&["user_id"]);
        let scanner =
            RowScanner::<Member>::new(&cols, &ColumnMapper::snake_case(), ScanMode::Lenient)
                .unwrap();
        let err = scanner.scan(&[RawValue::from("not-a-number")]).unwrap_err();
        assert!(matches!(err, BuilderxError::Execution(_)));
    }

    #[test]
    fn test_undecodable_unmapped_cell_is_ignored() {
        let cols = columns(&["user_id", "balance"]);
        let scanner =
            RowScanner::<Member>::new(&cols, &ColumnMapper::snake_case(), ScanMode::Lenient)
                .unwrap();

        let member = scanner
            .scan(&[
                RawValue::from("4"),
                RawValue::Undecodable("unsupported type numeric".to_string()),
            ])
            .unwrap();
        assert_eq!(member.user_id, 4);
    }

    #[test]
    fn test_undecodable_mapped_cell_fails() {
        let cols = columns(&["user_id", "name"]);
        let scanner =
            RowScanner::<Member>::new(&cols, &ColumnMapper::snake_case(), ScanMode::Lenient)
                .unwrap();

        let err = scanner
            .scan(&[
                RawValue::from("4"),
                RawValue::Undecodable("unsupported type citext".to_string()),
            ])
            .unwrap_err();
        match err {
            BuilderxError::Execution(msg) => assert!(msg.contains("citext")),
            other => panic!("Expected Execution error, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_accepts_repeated_column_names() {
        // users JOIN members: both sides contribute an id-like column
        let cols = columns(&["user_id", "name", "mail", "user_id"]);
        let scanner =
            RowScanner::<Member>::new(&cols, &ColumnMapper::snake_case(), ScanMode::Strict)
                .unwrap();

        let member = scanner
            .scan(&[
                RawValue::from("1"),
                RawValue::from("Ann"),
                RawValue::Null,
                RawValue::from("2"),
            ])
            .unwrap();
        assert_eq!(member.user_id, 1);
    }

    #[test]
    fn test_scan_mode_deserializes_lowercase() {
        let mode: ScanMode = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(mode, ScanMode::Strict);
    }
}
