// File: silcrow-vite/src/config.rs
// Purpose: Configuration parsing from the [vite] table of silcrow.toml

use crate::error::{Result, ViteError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Origin of the Vite development server.
pub const DEFAULT_DEV_SERVER_URL: &str = "http://localhost:3000";

/// Entry module requested from the development server.
pub const DEFAULT_DEV_ENTRY: &str = "main.js";

/// Top-level file layout: only the `[vite]` table is read, other tables are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    vite: ViteConfig,
}

/// Vite integration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViteConfig {
    /// Inject tags into every HTML response automatically (default: false)
    #[serde(default)]
    pub auto_insert: bool,

    /// Executable used to drive the front-end build (default: "npm")
    #[serde(default = "default_npm_bin_path")]
    pub npm_bin_path: String,

    /// Front-end project root; bundles live under `<root>/dist/assets` (default: "vite")
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_dev_server_url")]
    pub dev_server_url: String,

    #[serde(default = "default_dev_entry")]
    pub dev_entry: String,

    /// Development mode: tags point at the dev server instead of built bundles
    #[serde(default = "default_debug")]
    pub debug: bool,

    /// Fail instead of picking the first bundle when several match
    #[serde(default)]
    pub strict_assets: bool,

    /// Largest HTML body the interceptor will buffer
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

// Default values
fn default_npm_bin_path() -> String {
    "npm".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from("vite")
}

fn default_dev_server_url() -> String {
    DEFAULT_DEV_SERVER_URL.to_string()
}

fn default_dev_entry() -> String {
    DEFAULT_DEV_ENTRY.to_string()
}

fn default_debug() -> bool {
    cfg!(debug_assertions)
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for ViteConfig {
    fn default() -> Self {
        Self {
            auto_insert: false,
            npm_bin_path: default_npm_bin_path(),
            root: default_root(),
            dev_server_url: default_dev_server_url(),
            dev_entry: default_dev_entry(),
            debug: default_debug(),
            strict_assets: false,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ViteConfig {
    /// Load configuration from a TOML file, then apply `VITE_*` environment overrides.
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            Self::from_toml(&content).map_err(|e| {
                ViteError::Config(format!("failed to parse {}: {}", path.display(), e))
            })?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from default path (./silcrow.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("silcrow.toml")
    }

    /// Like [`ViteConfig::load_default`], but falls back to defaults on error.
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load vite config, using defaults");
            Self::default()
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.vite)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("VITE_AUTO_INSERT") {
            self.auto_insert = parse_bool("VITE_AUTO_INSERT", &value)?;
        }
        if let Some(value) = lookup("VITE_NPM_BIN_PATH") {
            self.npm_bin_path = value;
        }
        if let Some(value) = lookup("VITE_ROOT") {
            self.root = PathBuf::from(value);
        }
        if let Some(value) = lookup("VITE_DEBUG") {
            self.debug = parse_bool("VITE_DEBUG", &value)?;
        }
        Ok(())
    }

    /// Directory holding the production bundles.
    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("dist").join("assets")
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ViteError::Config(format!(
            "{} must be a boolean, got {:?}",
            key, other
        ))),
    }
}
