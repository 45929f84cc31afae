//! Runtime configuration and the persisted settings file
//!
//! Values come from CLI flags, then environment variables (a `.env` file is
//! honoured), then `config.json` in the naba config directory.

use crate::ai::gemini::client::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_CONFIG_DIR: &str = "NABA_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "config.json";

pub const VALID_KEYS: [&str; 3] = ["api_key", "model", "default_output_dir"];

pub const MISSING_API_KEY: &str = "GEMINI_API_KEY not set.\n\nSet it with: export GEMINI_API_KEY=<your-key>\nOr run: naba config set api_key <your-key>";

/// Values persisted by `naba config set`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_output_dir: Option<String>,
}

impl Settings {
    /// `$NABA_CONFIG_DIR`, or `naba` under the platform config directory.
    pub fn dir() -> PathBuf {
        match std::env::var(ENV_CONFIG_DIR) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from(".config"))
                .join("naba"),
        }
    }

    pub fn path() -> PathBuf {
        Self::dir().join(CONFIG_FILE_NAME)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// A missing file yields empty settings.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::LoadConfig(e.to_string())),
        };

        serde_json::from_str(&raw).map_err(|e| Error::LoadConfig(e.to_string()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::SaveConfig(e.to_string()))?;
        }
        let json =
            serde_json::to_string_pretty(self).map_err(|e| Error::SaveConfig(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| Error::SaveConfig(e.to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "api_key" => self.api_key.as_deref(),
            "model" => self.model.as_deref(),
            "default_output_dir" => self.default_output_dir.as_deref(),
            _ => None,
        };
        value.filter(|v| !v.is_empty())
    }

    /// Returns false for keys outside [`VALID_KEYS`].
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "api_key" => &mut self.api_key,
            "model" => &mut self.model,
            "default_output_dir" => &mut self.default_output_dir,
            _ => return false,
        };
        *slot = Some(value.to_string());
        true
    }
}

/// Everything a generation run needs, resolved once up front.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub default_output_dir: Option<PathBuf>,
}

impl Config {
    /// Resolve from the process environment and the settings file.
    ///
    /// An unreadable settings file is ignored here; `naba config` reports it.
    pub fn from_env(model_override: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Settings::load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring settings file {}: {}", Settings::path().display(), e);
            Settings::default()
        });

        Self::from_sources(&settings, model_override, |name| std::env::var(name).ok())
    }

    /// Precedence: `model_override`, then the environment, then `settings`.
    pub fn from_sources<F>(settings: &Settings, model_override: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| env(name).filter(|v| !v.is_empty());

        let api_key = env(ENV_API_KEY)
            .or_else(|| settings.get("api_key").map(str::to_string))
            .ok_or_else(|| Error::Auth(MISSING_API_KEY.to_string()))?;

        let model = model_override
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .or_else(|| env(ENV_MODEL))
            .or_else(|| settings.get("model").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = env(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout: DEFAULT_TIMEOUT,
            default_output_dir: settings.get("default_output_dir").map(PathBuf::from),
        })
    }
}
