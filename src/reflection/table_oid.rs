//! Table name to catalog object id resolution.

use tracing::debug;

use super::cache::{InfoCache, ReflectionKey};
use super::{qualified_name, ReflectError};
use crate::db::{cell, run_query, CatalogBackend, CatalogValue, DatabaseValue, HeaderIndex, Params};

/// Oid of a table visible on the current search path.
pub const TABLE_OID_SQL: &str = r#"
            SELECT c.oid
            FROM pg_catalog.pg_class c
            LEFT JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
            WHERE (pg_catalog.pg_table_is_visible(c.oid))
              AND c.relname = :table_name
              AND c.relkind IN ('r', 'v', 'm', 'f', 'p')
"#;

/// Oid of a table in an explicit schema.
pub const TABLE_OID_SCHEMA_SQL: &str = r#"
            SELECT c.oid
            FROM pg_catalog.pg_class c
            LEFT JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
            WHERE n.nspname = :schema
              AND c.relname = :table_name
              AND c.relkind IN ('r', 'v', 'm', 'f', 'p')
"#;

/// Maps a table name and optional schema to the catalog's internal id.
pub trait TableOidResolver {
    /// Resolve the table oid, memoizing through `info_cache` when given.
    fn table_oid(
        &self,
        db: &dyn CatalogBackend,
        table_name: &str,
        schema: Option<&str>,
        info_cache: Option<&InfoCache>,
    ) -> Result<u32, ReflectError>;
}

/// Resolver backed by `pg_catalog.pg_class`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgClassResolver;

impl TableOidResolver for PgClassResolver {
    fn table_oid(
        &self,
        db: &dyn CatalogBackend,
        table_name: &str,
        schema: Option<&str>,
        info_cache: Option<&InfoCache>,
    ) -> Result<u32, ReflectError> {
        match info_cache {
            Some(cache) => {
                let key = ReflectionKey::new(db.identity(), table_name, schema);
                cache
                    .table_oids()
                    .compute(key, |_| lookup_table_oid(db, table_name, schema))
            }
            None => lookup_table_oid(db, table_name, schema),
        }
    }
}

fn lookup_table_oid(
    db: &dyn CatalogBackend,
    table_name: &str,
    schema: Option<&str>,
) -> Result<u32, ReflectError> {
    let mut params = Params::new();
    params.insert("table_name".to_string(), CatalogValue::str(table_name));

    let sql = match schema {
        Some(schema) => {
            params.insert("schema".to_string(), CatalogValue::str(schema));
            TABLE_OID_SCHEMA_SQL
        }
        None => TABLE_OID_SQL,
    };

    let result = run_query(db, sql, params)?;
    let oid_idx = HeaderIndex::new(&result.headers).find("oid")?;

    let row = result.rows.first().ok_or_else(|| ReflectError::NoSuchTable {
        table: qualified_name(table_name, schema),
    })?;

    let value = cell(row, oid_idx);
    let oid = value
        .as_i64()
        .and_then(|oid| u32::try_from(oid).ok())
        .ok_or_else(|| ReflectError::UnexpectedValue {
            column: "oid".to_string(),
            expected: "oid",
            actual: value.type_name(),
        })?;

    debug!(table = %qualified_name(table_name, schema), oid, "resolved table oid");
    Ok(oid)
}
