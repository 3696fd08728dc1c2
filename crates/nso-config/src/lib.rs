//! Shared configuration for NSO RESTCONF tools.
//!
//! TOML profiles, credential resolution (flag/env + profile), and
//! translation to `nso_api::ConnectionParams`. The CLI layers its
//! `GlobalOpts` overrides on top through [`Overrides`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use nso_api::{ConnectionParams, TransportConfig};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_USERNAME: &str = "admin";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String, available: Vec<String> },

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
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named orchestrator profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named NSO instance.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Hostname or IP of the NSO northbound interface.
    pub host: Option<String>,

    /// RESTCONF (HTTP) port.
    pub port: Option<u16>,

    pub username: Option<String>,

    /// Plaintext password; `password_env` wins when both are set.
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$NSO_CONFIG`, else the platform config dir.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("NSO_CONFIG") {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "nso-restconf", "nso").map_or_else(
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
    p.push("nso");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
///
/// Nested keys can be overridden with `NSO_CFG_` variables using `__` as
/// the separator, e.g. `NSO_CFG_PROFILES__LAB__HOST=10.0.0.5`.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("NSO_CFG_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or is invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        debug!(error = %e, "falling back to default config");
        Config::default()
    })
}

// ── Resolution ──────────────────────────────────────────────────────

/// Values supplied outside the config file (CLI flags / `NSO_*` env vars).
/// Anything set here wins over the profile.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub timeout: Option<u64>,
}

/// Everything needed to build a `RestconfClient`.
#[derive(Debug, Clone)]
pub struct Connection {
    pub params: ConnectionParams,
    pub transport: TransportConfig,
}

/// Pick the profile name: explicit choice, else the config's default.
pub fn active_profile_name(explicit: Option<&str>, config: &Config) -> String {
    explicit
        .map(String::from)
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve the password chain: override > `password_env` > plaintext.
pub fn resolve_password(
    profile: Option<&Profile>,
    profile_name: &str,
    overrides: &Overrides,
) -> Result<SecretString, ConfigError> {
    if let Some(ref pw) = overrides.password {
        return Ok(pw.clone());
    }

    if let Some(profile) = profile {
        if let Some(ref env_name) = profile.password_env {
            if let Ok(val) = std::env::var(env_name) {
                return Ok(SecretString::from(val));
            }
        }
        if let Some(ref pw) = profile.password {
            return Ok(SecretString::from(pw.clone()));
        }
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Merge overrides, the named profile, and built-in defaults into a
/// [`Connection`].
///
/// A profile requested explicitly must exist; when falling back to the
/// default profile name a missing entry just means "defaults only".
pub fn resolve_connection(
    config: &Config,
    profile_name: &str,
    explicit: bool,
    overrides: &Overrides,
) -> Result<Connection, ConfigError> {
    let profile = config.profiles.get(profile_name);
    if profile.is_none() && explicit {
        let mut available: Vec<String> = config.profiles.keys().cloned().collect();
        available.sort();
        return Err(ConfigError::ProfileNotFound {
            name: profile_name.into(),
            available,
        });
    }

    let host = overrides
        .host
        .clone()
        .or_else(|| profile.and_then(|p| p.host.clone()))
        .unwrap_or_else(|| DEFAULT_HOST.into());
    if host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "must not be empty".into(),
        });
    }

    let port = overrides
        .port
        .or_else(|| profile.and_then(|p| p.port))
        .unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(ConfigError::Validation {
            field: "port".into(),
            reason: "must be between 1 and 65535".into(),
        });
    }

    let username = overrides
        .username
        .clone()
        .or_else(|| profile.and_then(|p| p.username.clone()))
        .unwrap_or_else(|| DEFAULT_USERNAME.into());

    let password = resolve_password(profile, profile_name, overrides)?;

    let timeout = overrides
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(config.defaults.timeout);

    debug!(profile = profile_name, %host, port, %username, timeout, "resolved connection");

    Ok(Connection {
        params: ConnectionParams::new(host, port, username, password),
        transport: TransportConfig::with_timeout(Duration::from_secs(timeout)),
    })
}
