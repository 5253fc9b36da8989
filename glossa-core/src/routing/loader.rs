//! Routing table loader
//!
//! Manages the embedded table and external table files.

use std::path::Path;
use std::sync::OnceLock;

use super::config::RoutingConfig;
use super::table::RoutingTable;
use crate::error::RoutingError;

/// Embedded routing table
static EMBEDDED: OnceLock<Result<RoutingTable, String>> = OnceLock::new();

/// The routing table compiled into this crate
pub fn embedded_table() -> Result<&'static RoutingTable, RoutingError> {
    EMBEDDED
        .get_or_init(|| {
            load_table(include_str!("../../configs/routing.toml")).map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|e| RoutingError::Invalid(format!("embedded table: {e}")))
}

/// Parse and validate a routing table from TOML text
pub fn load_table(toml_str: &str) -> Result<RoutingTable, RoutingError> {
    let config: RoutingConfig = toml::from_str(toml_str)?;
    RoutingTable::from_config(config)
}

/// Read a routing table from a file
pub fn load_table_file(path: &Path) -> Result<RoutingTable, RoutingError> {
    let toml_str = std::fs::read_to_string(path).map_err(|source| RoutingError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("Loading routing table from {}", path.display());
    load_table(&toml_str)
}
