use anyhow::{Context, Result};
use papilon_graph::BuildOptions;
use papilon_render::RenderOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Column selection and display options, usually read from TOML:
///
/// ```toml
/// [columns]
/// source_col = "from"
/// target_col = "to"
/// weight_col = "latency"
///
/// [render]
/// title = "Backbone"
/// node_size = 300
/// with_labels = false
///
/// [render.layout]
/// seed = 7
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TopologyConfig {
    pub columns: BuildOptions,
    pub render: RenderOptions,
}

impl TopologyConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse topology config")
    }
}

pub fn load_config(path: &Path) -> Result<TopologyConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {:?}", path))?;
    TopologyConfig::from_toml_str(&text).with_context(|| format!("invalid config {:?}", path))
}
