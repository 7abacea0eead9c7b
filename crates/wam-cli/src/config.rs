use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use wam_validate::RunnerOptions;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub validation: ValidationConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Platforms validated when none are passed on the command line.
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default = "default_rule_timeout_secs")]
    pub rule_timeout_secs: u64,
}

fn default_rule_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validation: ValidationConfig {
                platforms: Vec::new(),
                rule_timeout_secs: default_rule_timeout_secs(),
            },
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse wam.toml")?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            rule_timeout: Duration::from_secs(self.validation.rule_timeout_secs),
        }
    }
}
