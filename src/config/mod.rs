//! Configuration management for Cloudscope

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{CacheTtl, ResourceKind};
use crate::error::{ConfigError, Result};

/// Profile used when none is configured
pub const DEFAULT_PROFILE: &str = "default";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active provider profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_profile: Option<String>,

    /// Region override for the active profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Response cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether provider responses are cached at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between background expiry sweeps
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Per-kind TTLs in seconds, keyed by kind name (e.g. "s3:buckets")
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ttl_overrides: BTreeMap<String, u64>,
}

fn default_enabled() -> bool {
    true
}

fn default_sweep_interval_secs() -> u64 {
    CacheTtl::SWEEP_INTERVAL.as_secs()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            sweep_interval_secs: default_sweep_interval_secs(),
            ttl_overrides: BTreeMap::new(),
        }
    }
}

impl CacheConfig {
    /// TTL for a kind: the configured override, else the kind's default
    pub fn ttl_for(&self, kind: ResourceKind) -> Duration {
        self.ttl_overrides
            .get(&kind.name())
            .map(|secs| Duration::from_secs(*secs))
            .unwrap_or_else(|| kind.default_ttl())
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Reject zero sweep intervals and overrides for unknown kinds
    pub fn validate(&self) -> Result<()> {
        if self.sweep_interval_secs == 0 {
            return Err(
                ConfigError::Invalid("cache.sweep_interval_secs must be positive".to_string())
                    .into(),
            );
        }
        if let Some(unknown) = self
            .ttl_overrides
            .keys()
            .find(|name| ResourceKind::from_name(name).is_none())
        {
            return Err(ConfigError::Invalid(format!(
                "unknown resource kind in cache.ttl_overrides: {}",
                unknown
            ))
            .into());
        }
        Ok(())
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".cloudscope").join("config.yaml"))
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.cache.validate()?;

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::default_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(&path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    pub fn profile(&self) -> &str {
        self.active_profile.as_deref().unwrap_or(DEFAULT_PROFILE)
    }

    /// Cache identity for the active profile: `profile` or `profile@region`
    pub fn identity(&self) -> String {
        match &self.region {
            Some(region) => format!("{}@{}", self.profile(), region),
            None => self.profile().to_string(),
        }
    }
}
