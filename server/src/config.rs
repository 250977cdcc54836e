use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::LOG_FILTER,
    resources::{Wave, WaveSchedule},
};
use common::{ArenaLayout, GeneratorSettings, MapConfig, config::default_presets};

// ============================================================================
// Logging
// ============================================================================

// RUST_LOG overrides the default filter
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// ============================================================================
// Arena Configuration File
// ============================================================================

/// Generator settings, presets and waves. Missing sections fall back to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct ArenaConfig {
    pub settings: GeneratorSettings,
    pub presets: Vec<MapConfig>,
    pub waves: Vec<Wave>,
}

impl ArenaConfig {
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        if self.presets.is_empty() {
            self.presets = default_presets();
        }
        if self.waves.is_empty() {
            self.waves = WaveSchedule::default().0;
        }
        self
    }
}

#[cfg(feature = "json")]
pub fn load_arena_config(path: Option<&Path>) -> Result<ArenaConfig> {
    let Some(path) = path else {
        return Ok(ArenaConfig::default().with_defaults());
    };
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config: ArenaConfig =
        common::io::decode_json(&data).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config.with_defaults())
}

#[cfg(not(feature = "json"))]
pub fn load_arena_config(path: Option<&Path>) -> Result<ArenaConfig> {
    if let Some(path) = path {
        bail!("cannot load {}: built without the json feature", path.display());
    }
    Ok(ArenaConfig::default().with_defaults())
}

// ============================================================================
// Layout Export
// ============================================================================

// Encoding is picked by extension: `.json` or `.bin`
pub fn encode_layout(layout: &ArenaLayout, path: &Path) -> Result<Vec<u8>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        #[cfg(feature = "json")]
        Some("json") => common::io::encode_json(layout),
        #[cfg(feature = "bincode")]
        Some("bin") => common::io::encode_bincode(layout),
        other => bail!("no layout encoder enabled for extension {other:?}"),
    }
}

pub fn export_layout(layout: &ArenaLayout, path: &Path) -> Result<()> {
    let data = encode_layout(layout, path)?;
    std::fs::write(path, &data).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("exported {} ({} bytes) to {}", layout.name, data.len(), path.display());
    Ok(())
}
