use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::domain::Locale;
use crate::errors::{BookingError, Result};
use crate::utils::paths;

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub brand: String,
    pub splash: SplashConfig,
    pub plain_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::PtBr.to_string(),
            brand: "AJ Paisagismo".into(),
            splash: SplashConfig::default(),
            plain_mode: false,
        }
    }
}

impl Config {
    /// Parsed locale; unknown tags fall back to pt-BR.
    pub fn locale(&self) -> Locale {
        self.locale.parse().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to pt-BR");
            Locale::PtBr
        })
    }
}

/// How long the splash screen stays up before the calendar opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    pub display_ms: u64,
    pub fade_ms: u64,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            display_ms: 2500,
            fade_ms: 500,
        }
    }
}

impl SplashConfig {
    pub fn total(&self) -> Duration {
        Duration::from_millis(self.display_ms.saturating_add(self.fade_ms))
    }
}

/// Loads and saves [`Config`] under `<base>/config/config.json`.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: paths::config_file_in(&base),
        }
    }

    /// Reads the config file, returning defaults when it does not exist.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data).map_err(|err| {
            BookingError::Config(format!("{}: {}", self.path.display(), err))
        })?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
