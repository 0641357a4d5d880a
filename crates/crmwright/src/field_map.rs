//! Field maps: the label/value pairs carried by a scenario's data table.
//!
//! A step such as
//!
//! ```text
//! When I create a new Account with:
//!   | Account Name | Acme Corp |
//!   | Type         | Prospect  |
//!   | Active       | Yes       |
//! ```
//!
//! yields a [`FieldMap`] of `("Account Name", "Acme Corp")`, `("Type",
//! "Prospect")`, `("Active", "Yes")`. Values stay strings; dates, flags and
//! numbers are interpreted by whoever consumes the field.

use crate::result::{CrmError, CrmResult};

/// Placeholder Lightning picklists show for "no value"
pub const NONE_OPTION: &str = "--None--";

/// Check whether a value means "leave the control alone"
#[must_use]
pub fn is_blank(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == NONE_OPTION
}

/// Interpret a table value as a checkbox state (`yes`/`true`, any case)
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "yes" | "true")
}

/// Ordered label/value pairs parsed from a two-column data table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// Create an empty field map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from table rows using rows-hash semantics.
    ///
    /// Every row must have exactly two cells. Cells are trimmed.
    pub fn from_rows<R, C>(rows: R) -> CrmResult<Self>
    where
        R: IntoIterator<Item = C>,
        C: AsRef<[String]>,
    {
        let mut map = Self::new();
        for (row, cells) in rows.into_iter().enumerate() {
            match cells.as_ref() {
                [label, value] => map.insert(label.trim(), value.trim()),
                other => {
                    return Err(CrmError::InvalidTable {
                        row,
                        message: format!("expected 2 cells, found {}", other.len()),
                    })
                }
            }
        }
        Ok(map)
    }

    /// Append a pair
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.entries.push((label.into(), value.into()));
    }

    /// Builder-style append
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(label, value);
        self
    }

    /// Value for a label. A repeated label resolves to its last value.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the label appears at least once
    #[must_use]
    pub fn contains_key(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    /// Iterate over every pair in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    /// Labels in table order
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(l, _)| l.as_str()).collect()
    }

    /// Number of pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop pairs whose value is blank or `--None--`
    #[must_use]
    pub fn retain_filled(mut self) -> Self {
        self.entries.retain(|(_, v)| !is_blank(v));
        self
    }

    /// Narrower map holding only the given labels, in this map's order
    #[must_use]
    pub fn subset(&self, labels: &[&str]) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(l, _)| labels.contains(&l.as_str()))
                .cloned()
                .collect(),
        }
    }
}

impl<L: Into<String>, V: Into<String>> FromIterator<(L, V)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (L, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(l, v)| (l.into(), v.into()))
                .collect(),
        }
    }
}
