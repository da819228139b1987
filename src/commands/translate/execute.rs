use std::error::Error;

use serde::Serialize;

use super::TranslateCmd;
use crate::commands::Execute;
use crate::config::ConfigFile;
use crate::connect::{translate, ConnectArgs};

/// Result of the translate command execution.
///
/// `connection` is `None` when no URL was given anywhere, meaning no
/// connection should be attempted.
#[derive(Debug, Clone, Serialize)]
pub struct TranslateResult {
    pub connection: Option<ConnectArgs>,
}

impl Execute for TranslateCmd {
    type Output = TranslateResult;

    fn execute(self, config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>> {
        let url = self
            .url
            .or_else(|| config.connection.as_ref().map(|c| c.url.clone()));

        let connection = translate(url.as_deref())?;

        Ok(TranslateResult { connection })
    }
}
