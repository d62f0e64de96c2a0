//! CLI command implementations

pub mod config;
pub mod presets;
pub mod render;
pub mod run;

use anyhow::{Context, Result};
use clap::Args;
use plexus_field::{FieldConfig, FieldPreset};

/// Where a field configuration comes from. A config file may itself name a
/// preset; `--preset` on the command line wins over that.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldSource {
    /// Built-in preset (about, contact, projects)
    #[arg(long)]
    pub preset: Option<String>,

    /// Path to a TOML field configuration
    #[arg(long)]
    pub config: Option<String>,

    /// PRNG seed for reproducible output
    #[arg(long)]
    pub seed: Option<u32>,
}

impl FieldSource {
    pub fn resolve(&self) -> Result<FieldConfig> {
        let mut config = match (&self.config, &self.preset) {
            (Some(path), Some(preset)) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path))?;
                let mut doc: toml::value::Table =
                    toml::from_str(&text).with_context(|| format!("Failed to parse {}", path))?;
                doc.insert("preset".to_string(), toml::Value::String(preset.clone()));
                FieldConfig::from_toml(&doc)?
            }
            (Some(path), None) => FieldConfig::load(path)
                .with_context(|| format!("Failed to load config file: {}", path))?,
            (None, Some(preset)) => preset.parse::<FieldPreset>()?.config(),
            (None, None) => FieldConfig::default(),
        };
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}
