//! secured_jdbc library - secured JDBC dialect support
//!
//! Translates generic connection URLs into native driver arguments and
//! reflects unique constraints from a PostgreSQL-compatible catalog, along
//! with the configuration, logging and output infrastructure the CLI uses.

pub mod cli;
pub mod commands;
pub mod config;
pub mod connect;
pub mod db;
pub mod logging;
pub mod output;
pub mod reflection;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
