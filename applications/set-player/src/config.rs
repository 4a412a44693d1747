/// Player configuration
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use setlist_playback::PlaybackConfig;
use setlist_resolver::ResolverConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix (`SETLIST_PRELOAD__MAX_CONCURRENCY=4`)
pub const ENV_PREFIX: &str = "SETLIST";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default = "default_preload")]
    pub preload: PreloadSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_resolver")]
    pub resolver: ResolverSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PreloadSettings {
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_restart_threshold_secs")]
    pub restart_threshold_secs: f64,

    #[serde(default = "default_volume")]
    pub default_volume: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
}

impl PlayerConfig {
    /// Load configuration from an optional TOML file and the environment
    ///
    /// A missing file is skipped; environment variables override the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_environment(path, default_environment())
    }

    /// Load configuration using a custom environment source
    pub fn load_with_environment(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            } else {
                tracing::debug!(path = %path.display(), "Config file not found; using defaults");
            }
        }

        settings = settings.add_source(environment);

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.preload.max_concurrency == 0 {
            return Err(AppError::Config(
                "preload.max_concurrency must be at least 1".to_string(),
            ));
        }

        let threshold = self.playback.restart_threshold_secs;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(AppError::Config(format!(
                "playback.restart_threshold_secs must be a non-negative number (got {threshold})"
            )));
        }

        if self.playback.default_volume > 100 {
            return Err(AppError::Config(format!(
                "playback.default_volume must be between 0 and 100 (got {})",
                self.playback.default_volume
            )));
        }

        let base_url = self.resolver.base_url.trim();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "resolver.base_url must start with http:// or https:// (got {:?})",
                self.resolver.base_url
            )));
        }

        if self.resolver.timeout_secs == 0 {
            return Err(AppError::Config(
                "resolver.timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.resolver.cache_size == 0 {
            return Err(AppError::Config(
                "resolver.cache_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Settings for the playback controller and preload scheduler
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            volume: self.playback.default_volume,
            restart_threshold_secs: self.playback.restart_threshold_secs,
            max_concurrency: self.preload.max_concurrency,
        }
    }

    /// Settings for the HTTP resolver
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new(self.resolver.base_url.clone())
            .with_timeout(Duration::from_secs(self.resolver.timeout_secs))
    }
}

fn default_environment() -> config::Environment {
    environment(ENV_PREFIX)
}

// Default values
fn default_preload() -> PreloadSettings {
    PreloadSettings {
        max_concurrency: default_max_concurrency(),
    }
}

fn default_max_concurrency() -> usize {
    2
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        restart_threshold_secs: default_restart_threshold_secs(),
        default_volume: default_volume(),
    }
}

fn default_restart_threshold_secs() -> f64 {
    2.0
}

fn default_volume() -> u8 {
    80
}

fn default_resolver() -> ResolverSettings {
    ResolverSettings {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
        cache_size: default_cache_size(),
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_cache_size() -> usize {
    setlist_resolver::DEFAULT_CACHE_SIZE
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        settings_path: default_settings_path(),
    }
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("./data/player_settings.json")
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            preload: default_preload(),
            playback: default_playback(),
            resolver: default_resolver(),
            storage: default_storage(),
        }
    }
}

/// Environment source for `prefix`, with the same separators as [`PlayerConfig::load`]
pub fn environment(prefix: &str) -> config::Environment {
    config::Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
