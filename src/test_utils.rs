//! Shared test utilities for reflection and command tests.
//!
//! Provides a scripted in-memory catalog backend and builders for the result
//! sets the reflection queries expect.

use std::sync::Mutex;

use crate::db::{CatalogBackend, CatalogValue, DbError, Params, QueryResult};

/// Identity reported by [`ScriptedCatalog::new`].
pub const TEST_IDENTITY: &str = "reader@localhost:5432/app";

/// Catalog backend that answers queries from canned results.
///
/// Each response is registered against a SQL fragment; the first response
/// whose fragment occurs in the executed SQL wins. Every call is recorded.
pub struct ScriptedCatalog {
    identity: String,
    responses: Vec<(String, QueryResult)>,
    calls: Mutex<Vec<(String, Params)>>,
}

impl Default for ScriptedCatalog {
    fn default() -> Self {
        Self::with_identity(TEST_IDENTITY)
    }
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            responses: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer queries containing `fragment` with `result`.
    pub fn respond(mut self, fragment: &str, result: QueryResult) -> Self {
        self.responses.push((fragment.to_string(), result));
        self
    }

    /// Standard setup: table oid lookup plus the unique constraint query.
    pub fn with_table(oid: i64, unique: QueryResult) -> Self {
        Self::new()
            .respond("pg_class", oid_result(oid))
            .respond("pg_constraint", unique)
    }

    /// Number of executed queries containing `fragment`.
    pub fn call_count(&self, fragment: &str) -> usize {
        self.calls()
            .iter()
            .filter(|(sql, _)| sql.contains(fragment))
            .count()
    }

    pub fn calls(&self) -> Vec<(String, Params)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CatalogBackend for ScriptedCatalog {
    fn execute_query(&self, sql: &str, params: &Params) -> Result<QueryResult, DbError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((sql.to_string(), params.clone()));
        }

        self.responses
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, result)| result.clone())
            .ok_or_else(|| DbError::QueryFailed {
                message: "no scripted response for query".to_string(),
            })
    }

    fn backend_name(&self) -> &'static str {
        "Scripted"
    }

    fn identity(&self) -> &str {
        &self.identity
    }
}

/// Result of the table oid lookup with a single row.
pub fn oid_result(oid: i64) -> QueryResult {
    QueryResult {
        headers: vec!["oid".to_string()],
        rows: vec![vec![CatalogValue::Int(oid)]],
    }
}

/// Result of the table oid lookup for a missing table.
pub fn no_table_result() -> QueryResult {
    QueryResult {
        headers: vec!["oid".to_string()],
        rows: vec![],
    }
}

/// Result of the unique constraint query.
///
/// Each tuple is `(constraint name, key ordinals, column ordinal, column name)`.
pub fn unique_result(rows: &[(&str, &[i64], i64, &str)]) -> QueryResult {
    QueryResult {
        headers: ["name", "key", "col_num", "col_name"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
        rows: rows
            .iter()
            .map(|(name, key, col_num, col_name)| {
                vec![
                    CatalogValue::str(*name),
                    CatalogValue::IntArray(key.to_vec()),
                    CatalogValue::Int(*col_num),
                    CatalogValue::str(*col_name),
                ]
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_default_uses_test_identity() {
        let db = ScriptedCatalog::default();
        assert_eq!(db.identity(), TEST_IDENTITY);
        assert!(db.calls().is_empty());
    }

    #[rstest]
    fn test_unscripted_query_fails() {
        let db = ScriptedCatalog::default();
        assert!(db.execute_query("SELECT 1", &Params::new()).is_err());
        assert_eq!(db.call_count("SELECT 1"), 1);
    }
}
