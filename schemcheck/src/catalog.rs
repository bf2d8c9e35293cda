//! Standard parts catalog.
//!
//! The catalog is the allow-list of approved part numbers, maintained as a
//! spreadsheet. Every sheet is scanned for a header cell reading
//! "Part Number" (any case, with a space, an underscore or nothing between
//! the words); sheets without one are skipped. The catalog is rebuilt on
//! every run.

use std::collections::HashSet;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::checks::patterns::is_part_number_header;
use crate::core::SchemCheckError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardPartsCatalog {
    parts: HashSet<String>,
}

impl StandardPartsCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every qualifying sheet of an `.xlsx`, `.xlsm`, `.xls` or `.ods` file.
    pub fn load(path: &Path) -> Result<Self, SchemCheckError> {
        let mut workbook = open_workbook_auto(path)?;
        let mut catalog = Self::new();

        for sheet in workbook.sheet_names() {
            let range = workbook.worksheet_range(&sheet)?;
            let rows = range
                .rows()
                .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
            catalog.ingest_sheet(&sheet, rows);
        }

        if catalog.is_empty() {
            tracing::warn!(
                "No part numbers found in {}; every part number will be reported",
                path.display()
            );
        } else {
            tracing::debug!(parts = catalog.len(), "Loaded standard parts from {}", path.display());
        }

        Ok(catalog)
    }

    /// Add the part number column of one sheet. The first row is the
    /// header row; `None` cells are empty. Returns whether the sheet had a
    /// part number column.
    pub fn ingest_sheet<I>(&mut self, sheet: &str, rows: I) -> bool
    where
        I: IntoIterator<Item = Vec<Option<String>>>,
    {
        let mut rows = rows.into_iter();
        let column = rows.next().and_then(|header| {
            header
                .iter()
                .position(|cell| cell.as_deref().is_some_and(is_part_number_header))
        });

        let Some(column) = column else {
            tracing::debug!(sheet, "No part number column; skipping sheet");
            return false;
        };

        let before = self.parts.len();
        for mut row in rows {
            if let Some(part) = row.get_mut(column).and_then(Option::take) {
                self.parts.insert(part);
            }
        }
        tracing::debug!(sheet, added = self.parts.len() - before, "Read part number column");
        true
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, part: &str) -> bool {
        self.parts.contains(part)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StandardPartsCatalog {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            parts: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Text form of a cell; numbers without a fractional part print as integers.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}
