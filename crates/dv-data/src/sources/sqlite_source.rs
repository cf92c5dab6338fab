//! SQLite adapter
//!
//! Database files are passed through untouched. The conversion service owns
//! the real schema, so a configured stand-in schema is shown for review.

use dv_core::TableDefinition;

use crate::config::ImportConfig;

/// The stand-in schema used for SQLite uploads
pub fn stand_in_schema(config: &ImportConfig) -> Vec<TableDefinition> {
    tracing::debug!(
        "Using stand-in schema '{}' for SQLite upload",
        config.sqlite_stand_in.name
    );
    vec![config.sqlite_stand_in.clone()]
}
