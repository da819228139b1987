//! Output formatting for uniques command results.

use super::execute::UniquesResult;
use crate::output::Outputable;

impl Outputable for UniquesResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        let table = match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.table),
            None => self.table.clone(),
        };
        lines.push(format!("Unique constraints on: {}", table));
        lines.push(String::new());

        if self.constraints.is_empty() {
            lines.push("No unique constraints found.".to_string());
            return lines.join("\n");
        }

        lines.push(format!("Found {} constraint(s):", self.constraints.len()));
        for constraint in &self.constraints {
            lines.push(format!(
                "  {} ({})",
                constraint.name,
                constraint.column_names.join(", ")
            ));
        }

        lines.join("\n")
    }
}
