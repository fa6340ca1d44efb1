use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where to find the network feed and how to interpret it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Directory holding `stations.csv`, `lines.csv` and `sections.csv`
    pub data_dir: PathBuf,
    /// Add the reverse of every section so lines can be ridden both ways
    #[serde(default = "default_bidirectional")]
    pub bidirectional: bool,
}

fn default_bidirectional() -> bool {
    true
}

impl NetworkConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            bidirectional: default_bidirectional(),
        }
    }
}
