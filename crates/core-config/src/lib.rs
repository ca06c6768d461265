//! Configuration loading and parsing.
//!
//! Parses `mnsbadge.toml` (or an override path provided by the binary).
//! Every section is optional; absent fields take the defaults the badge
//! template was designed against (Satoshi Variable + Noto Color Emoji on a
//! 270x270 canvas, 30px baseline). Unknown fields are ignored so older
//! binaries tolerate newer files.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FontsConfig {
    #[serde(default = "FontsConfig::default_primary_path")]
    pub primary_path: PathBuf,
    #[serde(default = "FontsConfig::default_emoji_path")]
    pub emoji_path: PathBuf,
    #[serde(default = "FontsConfig::default_primary_family")]
    pub primary_family: String,
    #[serde(default = "FontsConfig::default_emoji_family")]
    pub emoji_family: String,
    #[serde(default = "FontsConfig::default_fallback_families")]
    pub fallback_families: Vec<String>,
    #[serde(default = "FontsConfig::default_weight")]
    pub weight: String,
    #[serde(default = "FontsConfig::default_baseline_size")]
    pub baseline_size: u32,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            primary_path: Self::default_primary_path(),
            emoji_path: Self::default_emoji_path(),
            primary_family: Self::default_primary_family(),
            emoji_family: Self::default_emoji_family(),
            fallback_families: Self::default_fallback_families(),
            weight: Self::default_weight(),
            baseline_size: Self::default_baseline_size(),
        }
    }
}

impl FontsConfig {
    fn default_primary_path() -> PathBuf {
        PathBuf::from("assets/SatoshiVariable.ttf")
    }
    fn default_emoji_path() -> PathBuf {
        PathBuf::from("assets/NotoColorEmoji.ttf")
    }
    fn default_primary_family() -> String {
        "Satoshi Variable".to_string()
    }
    fn default_emoji_family() -> String {
        "Noto Color Emoji".to_string()
    }
    fn default_fallback_families() -> Vec<String> {
        vec!["Apple Color Emoji".to_string(), "sans-serif".to_string()]
    }
    fn default_weight() -> String {
        "600".to_string()
    }
    const fn default_baseline_size() -> u32 {
        30
    }

    /// Font stack in priority order: primary, emoji, then fallbacks.
    pub fn families(&self) -> Vec<String> {
        let mut out = vec![self.primary_family.clone(), self.emoji_family.clone()];
        out.extend(self.fallback_families.iter().cloned());
        out
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CanvasConfig {
    #[serde(default = "CanvasConfig::default_side")]
    pub width: u32,
    #[serde(default = "CanvasConfig::default_side")]
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: Self::default_side(),
            height: Self::default_side(),
        }
    }
}

impl CanvasConfig {
    const fn default_side() -> u32 {
        270
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LinksConfig {
    #[serde(default = "LinksConfig::default_external_url_base")]
    pub external_url_base: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            external_url_base: Self::default_external_url_base(),
        }
    }
}

impl LinksConfig {
    fn default_external_url_base() -> String {
        "https://dapp.monadns.com/name/".to_string()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_dir")]
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
        }
    }
}

impl LoggingConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from(".")
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub fonts: FontsConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>,
    pub file: ConfigFile,
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("mnsbadge.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("mnsbadge").join("mnsbadge.toml");
    }
    PathBuf::from("mnsbadge.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                path: Some(path),
                file,
            })
        }
        Err(err) => {
            warn!(target: "config", path = %path.display(), %err, "config_parse_failed");
            Ok(Config::default())
        }
    }
}
