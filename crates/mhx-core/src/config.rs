use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// HTTP settings for external script fetching (optional `[fetch]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connection-phase timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Maximum redirects followed per request.
    pub max_redirects: u32,
    /// Optional `User-Agent` header; libcurl sends none by default.
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            connect_timeout_secs: 5,
            max_redirects: 10,
            user_agent: None,
        }
    }
}

/// Global configuration loaded from `~/.config/mhx/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MhxConfig {
    /// Fetch `<script src>` URLs during parse unless the CLI says otherwise.
    #[serde(default)]
    pub fetch_external: bool,
    #[serde(default)]
    pub fetch: FetchConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mhx")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MhxConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MhxConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: MhxConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
