use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::BaseDirs;

use crate::carousel::CarouselIds;
use crate::error::{CarouselError, Result};

const CONFIG_DIR: &str = "testimonial-carousel";
const MAIN_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub startup: StartupConfig,
    pub carousel: CarouselConfig,
    pub scroll: ScrollConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Feed path relative to `base`
    pub path: String,
    /// Directory or http(s) URL the feed path is resolved against
    pub base: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: "assets/reviews.json".to_string(),
            base: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Delay before the feed is fetched, giving late mount points time to appear
    pub grace_period_ms: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self { grace_period_ms: 100 }
    }
}

impl StartupConfig {
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub root_id: String,
    pub indicators_id: String,
    pub inner_id: String,
    /// Auto-advance period of the carousel widget
    pub interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            root_id: "reviewCarousel".to_string(),
            indicators_id: "carouselIndicators".to_string(),
            inner_id: "carouselInner".to_string(),
            interval_ms: 5000,
        }
    }
}

impl CarouselConfig {
    pub fn ids(&self) -> CarouselIds {
        CarouselIds::new(&self.root_id, &self.indicators_id, &self.inner_id)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub tick_interval_ms: u64,
    /// Distance advanced per tick, in container units
    pub step: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 3500,
            step: 350,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file used by the terminal views; defaults to the config directory
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
    app_config: AppConfig,
    /// Problems found while loading; logging is not set up yet at that point
    warnings: Vec<String>,
}

impl ConfigManager {
    /// Load from the default location, or from `path` when given.
    /// An explicit path that does not exist is an error; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(CarouselError::ConfigNotFound { path: p.to_path_buf() });
                }
                p.to_path_buf()
            }
            None => Self::default_config_dir()?.join(MAIN_CONFIG_FILE),
        };

        let mut warnings = Vec::new();
        let app_config = match Self::load_toml_file(&config_path) {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                warnings.push(format!("{}; using defaults", e));
                AppConfig::default()
            }
        };
        Ok(Self {
            config_path,
            app_config,
            warnings,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config_dir(&self) -> &Path {
        self.config_path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.app_config
    }

    pub fn app_config_mut(&mut self) -> &mut AppConfig {
        &mut self.app_config
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Emit the warnings collected by [`ConfigManager::load`].
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{}", warning);
        }
    }

    fn default_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| CarouselError::Config("Could not determine config directory".to_string()))
    }

    fn load_toml_file<T: for<'de> Deserialize<'de>>(path: &Path) -> std::result::Result<Option<T>, String> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }

    /// Write the default configuration unless a file already exists.
    /// Returns true when a file was written.
    pub fn write_default_config(&self) -> Result<bool> {
        if self.config_path.exists() {
            return Ok(false);
        }

        let dir = self.config_dir();
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|e| CarouselError::Config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(&AppConfig::default())
            .map_err(|e| CarouselError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&self.config_path, content)
            .map_err(|e| CarouselError::Config(format!("Failed to write config: {}", e)))?;
        Ok(true)
    }
}
