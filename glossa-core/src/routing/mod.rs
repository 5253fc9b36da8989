//! Language code to backend routing
//!
//! A declarative table maps language codes to backend families, with
//! optional substitute languages inside a family. The table is data: the
//! embedded default can be replaced by an external TOML file.

pub mod config;
pub mod loader;
pub mod table;

pub use config::{BackendKind, FamilyConfig, OutputShape, RoutingConfig};
pub use loader::{embedded_table, load_table, load_table_file};
pub use table::{Route, RoutingTable};
