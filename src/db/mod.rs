//! Catalog query channel.
//!
//! This module provides the database abstraction layer used by reflection:
//! - Connection management (PostgreSQL-protocol catalogs)
//! - Query execution with named parameter binding
//! - Result row extraction with type-safe helpers
//!
//! # Architecture
//!
//! The secured driver fronts a PostgreSQL-compatible catalog (`pg_catalog`).
//! Queries are plain SQL with `:name` placeholders and return a
//! [`QueryResult`] whose cells are [`CatalogValue`]s. Backends convert every
//! cell, arrays included, before the row is released.
//!
//! # Type Decisions
//!
//! **Why `i64` for ordinals and oids?**
//! Catalog integers arrive as `int2`, `int4` or `oid` depending on the column.
//! Widening all of them to `i64` keeps a single integer variant and avoids
//! lossy conversions; narrowing happens where a specific width is required.

mod backend;
mod config;
mod connection;
mod extraction;
mod pg;
mod query;
mod value;

pub use backend::{CatalogBackend, Params, QueryResult};
pub use config::{CatalogConfig, CATALOG_URL_ENV};
pub use connection::open_catalog;
pub use extraction::{cell, HeaderIndex};
pub use pg::PostgresCatalog;
pub use query::{compile_named_params, run_query};
pub use value::{parse_int_array_literal, CatalogValue, DatabaseValue};

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to open catalog '{target}': {message}")]
    OpenFailed { target: String, message: String },

    #[error("Invalid catalog configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Missing value for query parameter ':{name}'")]
    MissingParameter { name: String },

    #[error("Unsupported type '{type_name}' for '{column}'")]
    UnsupportedType { column: String, type_name: String },

    #[error("Missing column '{name}' in query result")]
    MissingColumn { name: String },
}
