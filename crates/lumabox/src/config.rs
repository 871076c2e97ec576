//! TOML configuration for the reference host.
//!
//! Named device profiles plus the credential-resolution chain
//! (env var -> keyring -> plaintext). Translated into `ConfigEntry`
//! records before anything touches the hub.

use std::collections::HashMap;
use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lumabox_hub::{ConfigEntry, entry};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no password found for device '{device}' (username is set)")]
    NoPassword { device: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Named device profiles.
    #[serde(default)]
    pub devices: HashMap<String, DeviceProfile>,
}

/// One configured device.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeviceProfile {
    /// Device IP or hostname.
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Entry title; defaults to the profile name.
    pub title: Option<String>,

    pub username: Option<String>,

    /// Password in plaintext — prefer keyring or `password_env`.
    pub password: Option<String>,

    /// Environment variable holding the password.
    pub password_env: Option<String>,
}

fn default_port() -> u16 {
    entry::DEFAULT_PORT
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "lumabox", "lumabox").map_or_else(
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
    p.push("lumabox");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit path (tests point this at a tempdir).
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LUMABOX_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Write a starter config with one example device.
pub fn write_example_config(path: &std::path::Path) -> Result<(), ConfigError> {
    let mut config = Config::default();
    config.devices.insert(
        "living-room".into(),
        DeviceProfile {
            host: entry::DEFAULT_HOST.into(),
            port: entry::DEFAULT_PORT,
            title: Some("Living room".into()),
            username: None,
            password: None,
            password_env: None,
        },
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(&config)?)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a device password: env var, then keyring, then plaintext.
pub fn resolve_password(profile: &DeviceProfile, device: &str) -> Option<SecretString> {
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    if let Ok(keyring_entry) = keyring::Entry::new("lumabox", &format!("{device}/password")) {
        if let Ok(secret) = keyring_entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    profile
        .password
        .as_ref()
        .map(|pw| SecretString::from(pw.clone()))
}

/// Build a `ConfigEntry` from a named profile.
///
/// A profile with a username must resolve a password somewhere in the
/// chain; credential-free profiles produce unauthenticated entries.
pub fn entry_from_profile(device: &str, profile: &DeviceProfile) -> Result<ConfigEntry, ConfigError> {
    let password = resolve_password(profile, device);
    if profile.username.is_some() && password.is_none() {
        return Err(ConfigError::NoPassword {
            device: device.to_owned(),
        });
    }

    let title = profile.title.clone().unwrap_or_else(|| device.to_owned());
    let mut config_entry = ConfigEntry::new(device, title, profile.host.clone());
    config_entry.port = profile.port;
    config_entry.username = profile.username.clone();
    config_entry.password = password;
    Ok(config_entry)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn example_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        write_example_config(&path).unwrap();
        let config = load_config_from(&path).unwrap();

        let profile = config.devices.get("living-room").unwrap();
        assert_eq!(profile.host, entry::DEFAULT_HOST);
        assert_eq!(profile.port, entry::DEFAULT_PORT);
    }

    #[test]
    fn profile_without_credentials_builds_anonymous_entry() {
        let profile = DeviceProfile {
            host: "10.0.0.5".into(),
            port: 80,
            title: None,
            username: None,
            password: None,
            password_env: None,
        };

        let config_entry = entry_from_profile("garage", &profile).unwrap();
        assert_eq!(config_entry.id.as_str(), "garage");
        assert_eq!(config_entry.title, "garage");
        assert!(config_entry.username.is_none());
        assert!(config_entry.password.is_none());
    }

    #[test]
    fn username_without_password_is_rejected() {
        let profile = DeviceProfile {
            host: "10.0.0.5".into(),
            port: 80,
            title: None,
            username: Some("admin".into()),
            password: None,
            password_env: None,
        };

        let err = entry_from_profile("garage", &profile).unwrap_err();
        assert!(matches!(err, ConfigError::NoPassword { .. }));
    }
}
