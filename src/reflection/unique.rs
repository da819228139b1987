//! Unique constraint reflection.
//!
//! One catalog query per table returns a row for every (constraint, column)
//! pair. Rows are grouped by constraint name, and each constraint's columns
//! are then read back in the order of its key-ordinal array. That order is
//! what makes the result usable: it is the column order of the index behind
//! the constraint, not the order the rows happened to arrive in.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::cache::{InfoCache, ReflectionKey};
use super::table_oid::TableOidResolver;
use super::{qualified_name, ReflectError};
use crate::db::{
    cell, run_query, CatalogBackend, CatalogValue, DatabaseValue, DbError, HeaderIndex, Params,
};

/// Unique constraints on one table, one row per constrained column.
pub const UNIQUE_SQL: &str = r#"
            SELECT
                cons.conname as name,
                cons.conkey as key,
                a.attnum as col_num,
                a.attname as col_name
            FROM
                pg_catalog.pg_constraint cons
                join pg_attribute a
                  on cons.conrelid = a.attrelid AND
                    a.attnum = ANY(cons.conkey)
            WHERE
                cons.conrelid = :table_oid AND
                cons.contype = 'u'
        "#;

/// A unique constraint with its columns in key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniqueConstraint {
    pub name: String,
    pub column_names: Vec<String>,
}

/// One catalog row, with the key-ordinal array already materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConstraintRow {
    pub name: String,
    pub key: Vec<i64>,
    pub col_num: i64,
    pub col_name: String,
}

/// Column positions of a `UNIQUE_SQL` result, looked up by header name.
#[derive(Debug)]
pub struct ConstraintRowLayout {
    pub name_idx: usize,
    pub key_idx: usize,
    pub col_num_idx: usize,
    pub col_name_idx: usize,
}

impl ConstraintRowLayout {
    pub fn from_headers(headers: &[String]) -> Result<Self, DbError> {
        let index = HeaderIndex::new(headers);
        Ok(Self {
            name_idx: index.find("name")?,
            key_idx: index.find("key")?,
            col_num_idx: index.find("col_num")?,
            col_name_idx: index.find("col_name")?,
        })
    }
}

impl RawConstraintRow {
    /// Extract a row, converting the key array to a plain sequence.
    pub fn from_row(row: &[CatalogValue], layout: &ConstraintRowLayout) -> Result<Self, ReflectError> {
        let unexpected = |column: &str, expected: &'static str, value: &CatalogValue| {
            ReflectError::UnexpectedValue {
                column: column.to_string(),
                expected,
                actual: value.type_name(),
            }
        };

        let name = cell(row, layout.name_idx);
        let key = cell(row, layout.key_idx);
        let col_num = cell(row, layout.col_num_idx);
        let col_name = cell(row, layout.col_name_idx);

        Ok(Self {
            name: name
                .as_string()
                .ok_or_else(|| unexpected("name", "string", name))?,
            key: key
                .materialize_ordinals()
                .ok_or_else(|| unexpected("key", "integer array", key))?,
            col_num: col_num
                .as_i64()
                .ok_or_else(|| unexpected("col_num", "integer", col_num))?,
            col_name: col_name
                .as_string()
                .ok_or_else(|| unexpected("col_name", "string", col_name))?,
        })
    }
}

#[derive(Debug)]
struct PendingConstraint {
    key: Vec<i64>,
    columns: HashMap<i64, String>,
}

/// Group rows by constraint and resolve each key ordinal to its column.
///
/// Constraints come out in the order their names were first seen. A key
/// ordinal with no matching row, or one ordinal reported under two different
/// column names, is a catalog inconsistency.
pub fn aggregate_unique_constraints(
    rows: impl IntoIterator<Item = RawConstraintRow>,
) -> Result<Vec<UniqueConstraint>, ReflectError> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut pending: Vec<(String, PendingConstraint)> = Vec::new();

    for row in rows {
        let RawConstraintRow {
            name,
            key,
            col_num,
            col_name,
        } = row;

        let slot = match slots.get(&name) {
            Some(&slot) => slot,
            None => {
                slots.insert(name.clone(), pending.len());
                pending.push((
                    name,
                    PendingConstraint {
                        key,
                        columns: HashMap::new(),
                    },
                ));
                pending.len() - 1
            }
        };

        let (constraint_name, constraint) = &mut pending[slot];
        match constraint.columns.entry(col_num) {
            Entry::Occupied(existing) if *existing.get() != col_name => {
                return Err(ReflectError::CatalogInconsistency {
                    constraint: constraint_name.clone(),
                    detail: format!(
                        "ordinal {} reported as both '{}' and '{}'",
                        col_num,
                        existing.get(),
                        col_name
                    ),
                });
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(entry) => {
                entry.insert(col_name);
            }
        }
    }

    pending
        .into_iter()
        .map(|(name, constraint)| resolve_columns(name, constraint))
        .collect()
}

fn resolve_columns(
    name: String,
    constraint: PendingConstraint,
) -> Result<UniqueConstraint, ReflectError> {
    let column_names = constraint
        .key
        .iter()
        .map(|ordinal| {
            constraint.columns.get(ordinal).cloned().ok_or_else(|| {
                ReflectError::CatalogInconsistency {
                    constraint: name.clone(),
                    detail: format!("key ordinal {} has no matching column", ordinal),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(UniqueConstraint { name, column_names })
}

/// Reflect the unique constraints of a table.
///
/// With an info cache, the whole result is memoized under (connection
/// identity, table, schema), and the table oid lookup shares the same cache.
/// Returns an empty list for a table without unique constraints.
pub fn get_unique_constraints(
    db: &dyn CatalogBackend,
    resolver: &dyn TableOidResolver,
    table_name: &str,
    schema: Option<&str>,
    info_cache: Option<&InfoCache>,
) -> Result<Vec<UniqueConstraint>, ReflectError> {
    match info_cache {
        Some(cache) => {
            let key = ReflectionKey::new(db.identity(), table_name, schema);
            cache.unique_constraints().compute(key, |_| {
                reflect_unique_constraints(db, resolver, table_name, schema, Some(cache))
            })
        }
        None => reflect_unique_constraints(db, resolver, table_name, schema, None),
    }
}

fn reflect_unique_constraints(
    db: &dyn CatalogBackend,
    resolver: &dyn TableOidResolver,
    table_name: &str,
    schema: Option<&str>,
    info_cache: Option<&InfoCache>,
) -> Result<Vec<UniqueConstraint>, ReflectError> {
    let table_oid = resolver.table_oid(db, table_name, schema, info_cache)?;

    let mut params = Params::new();
    params.insert("table_oid".to_string(), CatalogValue::Int(i64::from(table_oid)));

    let result = run_query(db, UNIQUE_SQL, params)?;
    let layout = ConstraintRowLayout::from_headers(&result.headers)?;

    let rows = result
        .rows
        .iter()
        .map(|row| RawConstraintRow::from_row(row, &layout))
        .collect::<Result<Vec<_>, _>>()?;

    let constraints = aggregate_unique_constraints(rows)?;

    debug!(
        table = %qualified_name(table_name, schema),
        count = constraints.len(),
        "reflected unique constraints"
    );

    Ok(constraints)
}
