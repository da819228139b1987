use std::error::Error;

use serde::Serialize;
use tracing::info;

use super::UniquesCmd;
use crate::commands::Execute;
use crate::config::ConfigFile;
use crate::db::{CatalogBackend, CatalogConfig};
use crate::reflection::{get_unique_constraints, InfoCache, PgClassResolver, UniqueConstraint};

/// Result of the uniques command execution
#[derive(Debug, Clone, Serialize)]
pub struct UniquesResult {
    pub table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub constraints: Vec<UniqueConstraint>,
}

impl UniquesCmd {
    /// Reflect against an already-open catalog.
    pub fn reflect(self, db: &dyn CatalogBackend) -> Result<UniquesResult, Box<dyn Error>> {
        let cache = InfoCache::new();
        let constraints = get_unique_constraints(
            db,
            &PgClassResolver,
            &self.table,
            self.schema.as_deref(),
            Some(&cache),
        )?;

        Ok(UniquesResult {
            table: self.table,
            schema: self.schema,
            constraints,
        })
    }
}

impl Execute for UniquesCmd {
    type Output = UniquesResult;

    fn execute(self, config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>> {
        let catalog = CatalogConfig::resolve(self.catalog.as_deref(), config)?;
        let db = catalog.connect()?;
        info!(backend = db.backend_name(), catalog = db.identity(), "connected to catalog");

        self.reflect(db.as_ref())
    }
}
