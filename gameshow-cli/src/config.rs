use anyhow::Context;
use gameshow_core::LedgerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub verbose: bool,
    /// Events shown by `gameshow events` when no limit is given.
    pub event_limit: usize,
    pub ledger: LedgerConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            verbose: false,
            event_limit: 20,
            ledger: LedgerConfig::default(),
        }
    }
}

impl CliConfig {
    /// Read `config.json` from the data dir, falling back to defaults when absent.
    pub fn load(data_dir: &Path) -> anyhow::Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<CliConfig>(&content)
                .with_context(|| format!("parsing {}", path.display()))?
        } else {
            CliConfig::default()
        };

        config.data_dir = data_dir.to_path_buf();
        config.ledger.validate()?;
        Ok(config)
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gameshow")
}
