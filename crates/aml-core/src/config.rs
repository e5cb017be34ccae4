use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_timeout_secs() -> u64 {
    10
}

/// Configuration loaded from `~/.config/aml/config.toml`.
///
/// The manifest paths, cache directory, and route prefix are fixed per
/// deployment; the config file holds them so the tool stays a zero-argument
/// one-shot batch job. CLI flags can override individual fields for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizeConfig {
    /// Input manifest of remote clip URLs.
    pub input_manifest: PathBuf,
    /// Output manifest with URLs rewritten to local routes.
    pub output_manifest: PathBuf,
    /// Directory where downloaded clips are cached (created if absent).
    pub audio_dir: PathBuf,
    /// Route prefix joined with the derived filename for rewritten URLs.
    /// A static-asset server is expected to serve `audio_dir` under it.
    pub route_prefix: String,
    /// Per-request timeout in seconds; bounds each individual download.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LocalizeConfig {
    fn default() -> Self {
        Self {
            input_manifest: PathBuf::from("imposter_audios_original.json"),
            output_manifest: PathBuf::from("public/imposter_audios.json"),
            audio_dir: PathBuf::from("public/imposter_audio"),
            route_prefix: "/imposter_audio/".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("aml")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LocalizeConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LocalizeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: LocalizeConfig = toml::from_str(&data)?;
    Ok(cfg)
}
