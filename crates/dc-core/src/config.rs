//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! server and media sections. Every section defaults sensibly so a completely
//! empty `{}` file is valid. Environment overrides (`DANCE_MEDIA_PATH`,
//! `PORT`) are layered on top with [`Config::apply_env`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// Environment variable overriding [`MediaConfig::path`].
pub const ENV_MEDIA_PATH: &str = "DANCE_MEDIA_PATH";

/// Environment variable overriding [`ServerConfig::port`].
pub const ENV_PORT: &str = "PORT";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub media: MediaConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored; an unparseable port is logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(media) = lookup(ENV_MEDIA_PATH).filter(|v| !v.is_empty()) {
            self.media.path = PathBuf::from(media);
        }

        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(e) => tracing::warn!("Ignoring {ENV_PORT}={port:?}: {e}"),
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if !self.media.path.is_dir() {
            warnings.push(format!(
                "media.path {} is not a directory; the library will be empty",
                self.media.path.display()
            ));
        }

        if !self.server.web_dir.is_dir() {
            warnings.push(format!(
                "server.web_dir {} does not exist; web UI requests will 404",
                self.server.web_dir.display()
            ));
        }

        if !self.server.receiver_dir.is_dir() {
            warnings.push(format!(
                "server.receiver_dir {} does not exist; receiver requests will 404",
                self.server.receiver_dir.display()
            ));
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Root of the web frontend assets.
    pub web_dir: PathBuf,
    /// Root of the receiver (display) app assets.
    pub receiver_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            web_dir: PathBuf::from("static/web"),
            receiver_dir: PathBuf::from("static/receiver"),
        }
    }
}

/// Media library settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Directory scanned for video files.
    pub path: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("media"),
        }
    }
}
