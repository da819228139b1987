//! Catalog connection management.

use super::backend::CatalogBackend;
use super::pg::PostgresCatalog;
use super::DbError;

/// Open a catalog connection as a backend trait object.
pub fn open_catalog(connection_string: &str) -> Result<Box<dyn CatalogBackend>, DbError> {
    let catalog = PostgresCatalog::connect(connection_string)?;
    Ok(Box::new(catalog))
}
