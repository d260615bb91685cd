use crate::i18n::Locale;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_AUTH_URL: &str = "http://localhost:8080/api/auth";
pub const DEFAULT_ADMIN_ROLE: &str = "ROLE_ADMIN";
pub const DEFAULT_PAGE_SIZE: u32 = 6;

const CONFIG_DIR: &str = ".modernblog";

/// A validation error in the configuration
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: {}", self.field, self.message)
    }
}

/// Configuration for the activity log
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActivityConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Defaults to `.modernblog/activity` under the working directory
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            dir: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}
fn default_admin_role() -> String {
    DEFAULT_ADMIN_ROLE.to_string()
}
fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
fn default_timeout_ms() -> u64 {
    30_000
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Session storage file; defaults to `~/.modernblog/storage.json`
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
    #[serde(default)]
    pub activity: ActivityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            auth_url: default_auth_url(),
            page_size: default_page_size(),
            admin_role: default_admin_role(),
            locale: Locale::default(),
            timeout_ms: default_timeout_ms(),
            storage_path: None,
            activity: ActivityConfig::default(),
        }
    }
}

/// One config file as written on disk; unset keys leave lower layers alone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigLayer {
    pub api_url: Option<String>,
    pub auth_url: Option<String>,
    pub page_size: Option<u32>,
    pub admin_role: Option<String>,
    pub locale: Option<Locale>,
    pub timeout_ms: Option<u64>,
    pub storage_path: Option<PathBuf>,
    #[serde(default)]
    pub activity: ActivityLayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityLayer {
    pub enabled: Option<bool>,
    pub dir: Option<PathBuf>,
}

impl ConfigLayer {
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let layer: ConfigLayer = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        Ok(layer)
    }
}

impl Config {
    /// Load configuration from default paths
    /// Priority: local (.modernblog/config.local.toml) > project (.modernblog/config.toml)
    /// > user (~/.modernblog/config.toml) > built-in defaults
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_layers(dirs::home_dir().as_deref(), root)
    }

    pub fn load_layers(home: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let mut candidates = Vec::new();
        if let Some(home) = home {
            candidates.push(home.join(CONFIG_DIR).join("config.toml"));
        }
        candidates.push(root.join(CONFIG_DIR).join("config.toml"));
        candidates.push(root.join(CONFIG_DIR).join("config.local.toml"));

        for path in candidates {
            if path.exists() {
                config.merge(ConfigLayer::load_from(&path)?);
            }
        }

        Ok(config)
    }

    /// Load a single explicit config file on top of the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge(ConfigLayer::load_from(path)?);
        Ok(config)
    }

    /// Merge a layer into this config (layer takes priority where set)
    pub fn merge(&mut self, other: ConfigLayer) {
        if let Some(v) = other.api_url {
            self.api_url = v;
        }
        if let Some(v) = other.auth_url {
            self.auth_url = v;
        }
        if let Some(v) = other.page_size {
            self.page_size = v;
        }
        if let Some(v) = other.admin_role {
            self.admin_role = v;
        }
        if let Some(v) = other.locale {
            self.locale = v;
        }
        if let Some(v) = other.timeout_ms {
            self.timeout_ms = v;
        }
        if other.storage_path.is_some() {
            self.storage_path = other.storage_path;
        }
        if let Some(v) = other.activity.enabled {
            self.activity.enabled = v;
        }
        if other.activity.dir.is_some() {
            self.activity.dir = other.activity.dir;
        }
    }

    pub fn activity_dir(&self, root: &Path) -> PathBuf {
        self.activity
            .dir
            .clone()
            .unwrap_or_else(|| root.join(CONFIG_DIR).join("activity"))
    }

    /// Validate configuration and return any errors found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (field, url) in [("api_url", &self.api_url), ("auth_url", &self.auth_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(ValidationError {
                    field: field.to_string(),
                    message: format!("Expected an http(s) URL, got '{}'", url),
                });
            }
        }

        if !(1..=100).contains(&self.page_size) {
            errors.push(ValidationError {
                field: "page_size".to_string(),
                message: format!("Must be between 1 and 100, got {}", self.page_size),
            });
        }

        if self.admin_role.trim().is_empty() {
            errors.push(ValidationError {
                field: "admin_role".to_string(),
                message: "Must not be empty".to_string(),
            });
        }

        if self.timeout_ms == 0 {
            errors.push(ValidationError {
                field: "timeout_ms".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
