use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Folder created under the home music directory when no target root is set.
pub const DEFAULT_TARGET_DIR: &str = "SADACT_Organized";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub organize: OrganizeConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Roots to scan; empty means the platform music, desktop and documents dirs.
    #[serde(default)]
    pub include: Vec<String>,
    /// Extra glob patterns to skip on top of the built-in exclusions.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeConfig {
    #[serde(default)]
    pub target_root: Option<String>,
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
    #[serde(default)]
    pub copy_then_delete: bool,
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            target_root: None,
            dry_run: default_dry_run(),
            copy_then_delete: false,
        }
    }
}

fn default_dry_run() -> bool {
    true
}

impl ScanConfig {
    pub fn roots(&self) -> Vec<PathBuf> {
        if !self.include.is_empty() {
            return self.include.iter().map(PathBuf::from).collect();
        }
        [dirs::audio_dir(), dirs::desktop_dir(), dirs::document_dir()]
            .into_iter()
            .flatten()
            .filter(|p| p.is_dir())
            .collect()
    }
}

impl OrganizeConfig {
    pub fn target_root(&self) -> PathBuf {
        match &self.target_root {
            Some(root) => PathBuf::from(root),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Music")
                .join(DEFAULT_TARGET_DIR),
        }
    }
}

/// Loads config from an optional TOML file layered with `SADACT__*` env vars.
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("SADACT")
            .prefix_separator("__")
            .separator("__"),
    );
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
