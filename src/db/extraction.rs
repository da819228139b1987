//! Row extraction helpers.

use std::collections::HashMap;

use super::value::CatalogValue;
use super::DbError;

static NULL: CatalogValue = CatalogValue::Null;

/// Header name to column position lookup, built once per result set.
#[derive(Debug)]
pub struct HeaderIndex<'a> {
    positions: HashMap<&'a str, usize>,
}

impl<'a> HeaderIndex<'a> {
    pub fn new(headers: &'a [String]) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), i))
            .collect();
        Self { positions }
    }

    /// Position of a required column.
    pub fn find(&self, name: &str) -> Result<usize, DbError> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| DbError::MissingColumn {
                name: name.to_string(),
            })
    }
}

/// Cell at `idx`, or null for short rows.
pub fn cell(row: &[CatalogValue], idx: usize) -> &CatalogValue {
    row.get(idx).unwrap_or(&NULL)
}
