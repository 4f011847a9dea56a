//! Configuration management for different scopes
//!
//! Supports two configuration scopes:
//! - Global: per-user configuration
//! - Project: `delivr.toml` in the project root, overriding global values

pub mod merge;
pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

use serde::{Deserialize, Serialize};

pub use merge::merge_configs;
pub use parser::{parse_delivr_toml, parse_delivr_toml_str, to_toml};
pub use paths::{CONFIG_FILE_NAME, config_path_for_scope, default_global_dir};
pub use schema::DelivrConfig;
pub use store::ConfigStore;

/// Configuration scope levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigScope {
    /// Per-user configuration
    Global,
    /// Per-project configuration (e.g., checked into version control)
    Project,
}

impl ConfigScope {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigScope::Global => "global",
            ConfigScope::Project => "project",
        }
    }
}
