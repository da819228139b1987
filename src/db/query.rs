//! Query execution utilities.

use std::fmt::Write;

use tracing::debug;

use super::backend::{CatalogBackend, Params, QueryResult};
use super::DbError;

/// Run a query with named parameters against a catalog backend.
pub fn run_query(
    db: &dyn CatalogBackend,
    sql: &str,
    params: Params,
) -> Result<QueryResult, DbError> {
    debug!(
        backend = db.backend_name(),
        params = ?params.keys().collect::<Vec<_>>(),
        "running catalog query"
    );
    let result = db.execute_query(sql, &params)?;
    debug!(rows = result.rows.len(), "catalog query returned");
    Ok(result)
}

/// Rewrite `:name` placeholders into positional `$n` placeholders.
///
/// Returns the rewritten SQL and the parameter names in positional order. A
/// name used more than once maps to the same position. Casts (`::type`) and
/// text inside single-quoted literals are left alone.
pub fn compile_named_params(sql: &str) -> (String, Vec<String>) {
    let mut compiled = String::with_capacity(sql.len());
    let mut names: Vec<String> = Vec::new();
    let mut chars = sql.chars().peekable();
    let mut in_literal = false;
    let mut prev = '\0';

    while let Some(c) = chars.next() {
        if c == '\'' {
            in_literal = !in_literal;
        }

        let starts_param = !in_literal
            && c == ':'
            && prev != ':'
            && chars
                .peek()
                .is_some_and(|next| next.is_ascii_alphabetic() || *next == '_');

        if !starts_param {
            compiled.push(c);
            prev = c;
            continue;
        }

        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }

        let position = match names.iter().position(|existing| *existing == name) {
            Some(index) => index + 1,
            None => {
                names.push(name);
                names.len()
            }
        };
        let _ = write!(compiled, "${}", position);
        prev = '$';
    }

    (compiled, names)
}
