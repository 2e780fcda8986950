use crate::config::toml_config::TomlConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "factory-sense")]
#[command(about = "Quality control and box storage for factory pieces")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Pieces per box (overrides the configuration file)
    #[arg(long)]
    pub box_capacity: Option<usize>,

    /// Where the JSON report is written (overrides the configuration file)
    #[arg(long)]
    pub export: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the configuration file, if any, and applies command line overrides.
    pub fn resolve(&self) -> crate::Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(capacity) = self.box_capacity {
            config.storage.box_capacity = Some(capacity);
            tracing::debug!("Box capacity overridden to: {}", capacity);
        }
        if let Some(path) = &self.export {
            config.report.export_path = Some(path.clone());
        }
        if self.json_logs {
            config.logging.format = Some("json".to_string());
        }
    }
}
