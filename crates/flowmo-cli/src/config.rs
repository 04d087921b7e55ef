use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "flowmo.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowmoConfig {
    /// Default output mode: `pretty`, `text` or `json`.
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include per-edge flow lines in `solve` output.
    #[serde(default)]
    pub show_edges: bool,
    /// Omit nodes no real edge touches.
    #[serde(default)]
    pub hide_idle_nodes: bool,
}

/// Load configuration with precedence: explicit `--config` path, then
/// `./flowmo.toml`, then `<config dir>/flowmo/config.toml`, then defaults.
///
/// An explicit path must exist; the implicit locations are optional.
pub fn load_config(explicit: Option<&Path>, working_dir: &Path) -> Result<FlowmoConfig> {
    if let Some(path) = explicit {
        return parse_config_file(path);
    }

    let candidates = [
        Some(working_dir.join(LOCAL_CONFIG_FILE)),
        user_config_path(),
    ];
    for path in candidates.into_iter().flatten() {
        if path.exists() {
            return parse_config_file(&path);
        }
    }

    Ok(FlowmoConfig::default())
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flowmo/config.toml"))
}

fn parse_config_file(path: &Path) -> Result<FlowmoConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<FlowmoConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
