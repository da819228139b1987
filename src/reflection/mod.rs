//! Schema reflection over the catalog channel.
//!
//! - [`table_oid`]: table name + schema to catalog object id
//! - [`unique`]: unique constraints as ordered column lists
//! - [`cache`]: explicit memoization for both, keyed by connection identity

pub mod cache;
pub mod table_oid;
pub mod unique;


pub use cache::{CacheStore, InfoCache, Memo, MemoryStore, ReflectionKey};
pub use table_oid::{PgClassResolver, TableOidResolver};
pub use unique::{
    aggregate_unique_constraints, get_unique_constraints, RawConstraintRow, UniqueConstraint,
    UNIQUE_SQL,
};

use thiserror::Error;

use crate::db::DbError;

#[derive(Error, Debug)]
pub enum ReflectError {
    #[error("Table '{table}' not found in catalog")]
    NoSuchTable { table: String },

    #[error("Catalog inconsistency in constraint '{constraint}': {detail}")]
    CatalogInconsistency { constraint: String, detail: String },

    #[error("Unexpected value in column '{column}': expected {expected}, got {actual}")]
    UnexpectedValue {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error(transparent)]
    Db(#[from] DbError),
}

/// `schema.table`, or just `table` when no schema was given.
pub(crate) fn qualified_name(table_name: &str, schema: Option<&str>) -> String {
    match schema {
        Some(schema) => format!("{}.{}", schema, table_name),
        None => table_name.to_string(),
    }
}
