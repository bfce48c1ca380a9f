//! Login settings and loading
//!
//! Settings precedence: explicit path > `IMPLICIT_AUTH_CONFIG` env var >
//! `implicit-auth.toml` in the working directory. Every section is optional;
//! an empty file yields the defaults (800x600 popup, ten-minute freshness
//! margin, in-memory token store).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Env var naming the settings file.
pub const CONFIG_ENV: &str = "IMPLICIT_AUTH_CONFIG";

/// Root settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub popup: PopupSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub store: StoreSettings,
}

/// Authorization popup settings
#[derive(Debug, Clone, Deserialize)]
pub struct PopupSettings {
    /// Registered redirect endpoint the provider sends the fragment to
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

/// Token cache settings
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Tokens expiring sooner than this are refreshed through the popup
    #[serde(default = "default_freshness_margin")]
    pub freshness_margin_secs: u64,
}

/// Token persistence settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSettings {
    /// JSON file backing the token store; in-memory when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_redirect_url() -> String {
    "oauthWindow.html".into()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_freshness_margin() -> u64 {
    600
}

impl Default for PopupSettings {
    fn default() -> Self {
        Self {
            redirect_url: default_redirect_url(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            freshness_margin_secs: default_freshness_margin(),
        }
    }
}

impl CacheSettings {
    /// Freshness margin in milliseconds, the unit the token clock uses.
    pub fn freshness_margin_millis(&self) -> f64 {
        self.freshness_margin_secs as f64 * 1000.0
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.popup.redirect_url.trim().is_empty() {
            return Err(Error::Config("redirect_url must not be empty".into()));
        }
        if self.popup.width == 0 {
            return Err(Error::Config("width must be greater than 0".into()));
        }
        if self.popup.height == 0 {
            return Err(Error::Config("height must be greater than 0".into()));
        }
        Ok(())
    }

    /// Resolve the settings file path from an explicit path or `IMPLICIT_AUTH_CONFIG`.
    pub fn resolve_path(explicit: Option<&str>) -> PathBuf {
        if let Some(p) = explicit {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(p);
        }
        PathBuf::from("implicit-auth.toml")
    }
}
