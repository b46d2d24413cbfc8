use std::fmt;

use super::record::FieldMapping;

/// Converts a field name to snake_case.
///
/// Acronyms stay together, so `UserID` becomes `user_id` and `HTTPServer`
/// becomes `http_server`. Hyphens, spaces and dots turn into underscores.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.trim().chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | ' ' | '.') {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }

        if !c.is_uppercase() {
            out.push(c);
            continue;
        }

        let prev = i.checked_sub(1).and_then(|j| chars.get(j)).copied();
        let next = chars.get(i + 1).copied();
        let boundary = match prev {
            Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
            // last capital of an acronym followed by a new word: "HTTPServer"
            Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
            _ => false,
        };
        if boundary && !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }

    let trimmed = out.trim_end_matches('_').len();
    out.truncate(trimmed);
    out
}

/// Naming convention that maps destination field names to result columns.
///
/// Installed once when a [`Database`](crate::Database) connects and fixed for
/// its lifetime. A field's explicit tag always wins over the mapped name.
#[derive(Clone, Copy)]
pub struct ColumnMapper {
    map: fn(&str) -> String,
}

impl ColumnMapper {
    pub fn new(map: fn(&str) -> String) -> Self {
        Self { map }
    }

    pub fn snake_case() -> Self {
        Self::new(to_snake_case)
    }

    /// Applies the convention to a bare field name.
    pub fn map_name(&self, field: &str) -> String {
        (self.map)(field)
    }

    /// Resolves the result column a field reads from.
    pub fn column_for<T>(&self, field: &FieldMapping<T>) -> String {
        match field.tag() {
            Some(tag) => tag.to_string(),
            None => self.map_name(field.name()),
        }
    }
}

impl Default for ColumnMapper {
    fn default() -> Self {
        Self::snake_case()
    }
}

impl fmt::Debug for ColumnMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnMapper").finish_non_exhaustive()
    }
}
