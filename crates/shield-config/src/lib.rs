//! Configuration for the koala-shield CLI.
//!
//! A TOML file under the platform config directory, overlaid with
//! `SHIELD_`-prefixed environment variables, and translated into
//! `shield_core::ShieldConfig`. The CLI applies its flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shield_core::ShieldConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// AWS region hosting the WAF Classic Regional resources.
    #[serde(default = "default_region")]
    pub aws_region: String,

    /// Default output format: table, json, json-compact, yaml, plain.
    #[serde(default = "default_output")]
    pub output: String,

    /// Color mode: auto, always, never.
    #[serde(default = "default_color")]
    pub color: String,

    /// WAF operation timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub routing: Routing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws_region: default_region(),
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            routing: Routing::default(),
        }
    }
}

/// The `[routing]` table: where bgpview lives and how hard to retry it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Routing {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_routing_timeout")]
    pub timeout: u64,

    /// Seconds to sleep before each retry.
    #[serde(default = "default_backoff")]
    pub backoff: Vec<u64>,

    /// Extra CA certificate (PEM) for TLS-inspecting proxies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for Routing {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_routing_timeout(),
            backoff: default_backoff(),
            ca_cert: None,
        }
    }
}

fn default_region() -> String {
    "us-east-1".into()
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_base_url() -> String {
    "https://api.bgpview.io".into()
}
fn default_routing_timeout() -> u64 {
    300
}
fn default_backoff() -> Vec<u64> {
    vec![1, 3, 5, 10]
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "koala", "koala-shield").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("koala-shield");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment.
///
/// A missing file is not an error. Environment keys use `__` to reach
/// nested tables: `SHIELD_AWS_REGION`, `SHIELD_ROUTING__BASE_URL`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SHIELD_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Render a config as pretty TOML.
pub fn to_toml(cfg: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(cfg)?)
}

// ── Translation to runtime config ───────────────────────────────────

impl Config {
    /// Validate and convert into the orchestrator's runtime config.
    pub fn to_shield_config(&self) -> Result<ShieldConfig, ConfigError> {
        if self.aws_region.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "aws_region".into(),
                reason: "must not be empty".into(),
            });
        }

        url::Url::parse(&self.routing.base_url).map_err(|e| ConfigError::Validation {
            field: "routing.base_url".into(),
            reason: format!("{e}: {}", self.routing.base_url),
        })?;

        for (field, secs) in [("timeout", self.timeout), ("routing.timeout", self.routing.timeout)] {
            if secs == 0 {
                return Err(ConfigError::Validation {
                    field: field.into(),
                    reason: "must be at least 1 second".into(),
                });
            }
        }

        Ok(ShieldConfig {
            aws_region: self.aws_region.clone(),
            routing_base_url: self.routing.base_url.clone(),
            backoff: self
                .routing
                .backoff
                .iter()
                .copied()
                .map(Duration::from_secs)
                .collect(),
            routing_timeout: Duration::from_secs(self.routing.timeout),
            routing_ca_cert: self.routing.ca_cert.clone(),
            firewall_timeout: Duration::from_secs(self.timeout),
        })
    }
}
