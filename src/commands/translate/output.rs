//! Output formatting for translate command results.

use super::execute::TranslateResult;
use crate::output::{mask_secret, Outputable};

impl Outputable for TranslateResult {
    fn to_table(&self) -> String {
        let Some(args) = &self.connection else {
            return "No connection URL given; no connection will be attempted.".to_string();
        };

        let username = if args.username().is_empty() {
            "(empty)"
        } else {
            args.username()
        };

        [
            format!("Driver:   {}", args.driver_class_name()),
            format!("URL:      {}", args.url()),
            format!("Username: {}", username),
            format!("Password: {}", mask_secret(args.password())),
        ]
        .join("\n")
    }
}
