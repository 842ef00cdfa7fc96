//! Configuration for the model service.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use screenplay_model::Result;

/// Where the service keeps its durable model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// Directory holding the per-kind collection files
    pub data_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./screenplay-data"),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}
