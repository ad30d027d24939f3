use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory before the user config.
pub const LOCAL_CONFIG_FILE: &str = "lineage.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageConfig {
    /// Preferred output mode: `pretty`, `text` or `json`.
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub duplicates: DuplicatesConfig,
    #[serde(default)]
    pub format: FormatConfig,
    #[serde(default)]
    pub resolve: ResolveConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicatesConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Pairs must be born strictly fewer than this many years apart.
    #[serde(default = "default_max_year_gap")]
    pub max_year_gap: u32,
    #[serde(default = "default_true")]
    pub require_birth_year: bool,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

impl Default for DuplicatesConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            max_year_gap: default_max_year_gap(),
            require_birth_year: default_true(),
            progress_interval: default_progress_interval(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_unknown")]
    pub unknown: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            unknown: default_unknown(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    #[serde(default = "default_min_score")]
    pub min_score: u8,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
        }
    }
}

/// Parse one config file.
///
/// # Errors
///
/// Fails when the file cannot be read or is not valid TOML for
/// [`LineageConfig`].
pub fn load_config_file(path: &Path) -> Result<LineageConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<LineageConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Candidate config locations, most specific first.
#[must_use]
pub fn config_paths(working_dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![working_dir.join(LOCAL_CONFIG_FILE)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("lineage/config.toml"));
    }
    paths
}

/// Load the first config file that exists, or the defaults.
///
/// # Errors
///
/// Fails only when an existing file cannot be read or parsed; a missing
/// file is not an error.
pub fn load_config(working_dir: &Path) -> Result<LineageConfig> {
    for path in config_paths(working_dir) {
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            return load_config_file(&path);
        }
    }
    Ok(LineageConfig::default())
}

/// Output mode from flag, `FORMAT` env var, config and TTY, in that order.
#[must_use]
pub fn resolve_output(cli_flag: Option<&str>, config: &LineageConfig) -> &'static str {
    resolve_output_inner(
        cli_flag,
        env::var("FORMAT").ok().as_deref(),
        config.output.as_deref(),
        std::io::stdout().is_terminal(),
    )
}

fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "plain" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

fn resolve_output_inner(
    cli_flag: Option<&str>,
    env_format: Option<&str>,
    config_output: Option<&str>,
    is_tty: bool,
) -> &'static str {
    [cli_flag, env_format, config_output]
        .into_iter()
        .flatten()
        .find_map(normalize_output_mode)
        .unwrap_or(if is_tty { "pretty" } else { "text" })
}

const fn default_true() -> bool {
    true
}

const fn default_top_k() -> usize {
    10
}

const fn default_max_year_gap() -> u32 {
    5
}

const fn default_progress_interval() -> usize {
    1000
}

fn default_template() -> String {
    "%n (%b)".to_string()
}

fn default_unknown() -> String {
    "unknown".to_string()
}

const fn default_min_score() -> u8 {
    50
}
