//! Catalog backend trait.
//!
//! A backend is the live query channel into a relational catalog. It is owned
//! by the caller; reflection code only borrows it for the duration of a call.

use std::collections::BTreeMap;

use super::value::CatalogValue;
use super::DbError;

/// Result of a query execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CatalogValue>>,
}

/// Type alias for named query parameters (`:name` placeholders).
pub type Params = BTreeMap<String, CatalogValue>;

/// Trait for backends that can execute catalog queries.
///
/// Implementations are not expected to be called concurrently on the same
/// underlying connection; they serialize access internally or are used from a
/// single thread.
pub trait CatalogBackend: Send + Sync {
    /// Execute a query with named parameters, returning fully materialized rows.
    fn execute_query(&self, sql: &str, params: &Params) -> Result<QueryResult, DbError>;

    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;

    /// Stable identity of the underlying connection target.
    ///
    /// Used as part of reflection cache keys. Must not contain credentials.
    fn identity(&self) -> &str;
}
