// Config entries
//
// An entry is the host's record of one configured device: where it
// lives and how to authenticate. The host owns entry lifecycle; this
// crate only reads the fields.

use std::fmt;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Integration domain, used to namespace actions and dashboard paths.
pub const DOMAIN: &str = "lumabox";

/// Timeout applied to the identification round trip and all subsequent
/// feature calls made through the session built during setup.
pub const DEFAULT_SETUP_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_HOST: &str = "192.168.0.2";
pub const DEFAULT_PORT: u16 = 80;

/// Opaque identifier of a config entry, assigned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// One configured device instance.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    pub id: EntryId,
    /// Human-readable entry title, used for dashboard names.
    pub title: String,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl ConfigEntry {
    /// Entry with default port and no credentials; fields are public for
    /// the host to fill in.
    pub fn new(id: impl Into<EntryId>, title: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            host: host.into(),
            port: DEFAULT_PORT,
            username: None,
            password: None,
        }
    }
}
