// HTTP session and API host descriptor.
//
// Lumabox devices expose a plain HTTP API on the local network. Some are
// protected with basic auth; most are wide open. The session decides
// which variant to use, the ApiHost pins it to one host:port.

use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// Credentials for a password-protected device.
#[derive(Clone)]
struct Credentials {
    username: String,
    password: SecretString,
}

/// An HTTP session for talking to Lumabox devices.
///
/// Either authenticated (basic auth on every request) or unauthenticated.
/// Construction never touches the network.
#[derive(Clone)]
pub struct Session {
    http: reqwest::Client,
    credentials: Option<Credentials>,
}

impl Session {
    /// Create an unauthenticated session.
    pub fn unauthenticated(timeout: Duration) -> Result<Self, Error> {
        Ok(Self {
            http: build_client(timeout)?,
            credentials: None,
        })
    }

    /// Create a session that sends basic auth with every request.
    pub fn basic_auth(
        username: impl Into<String>,
        password: SecretString,
        timeout: Duration,
    ) -> Result<Self, Error> {
        Ok(Self {
            http: build_client(timeout)?,
            credentials: Some(Credentials {
                username: username.into(),
                password,
            }),
        })
    }

    /// Create an authenticated session when both username and password are
    /// present, an unauthenticated one otherwise.
    pub fn maybe_authenticated(
        username: Option<&str>,
        password: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        match (username, password) {
            (Some(user), Some(pass)) => Self::basic_auth(user, pass, timeout),
            _ => Self::unauthenticated(timeout),
        }
    }

    /// Whether this session carries credentials.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Start a GET request with the session's auth applied.
    pub(crate) fn get(&self, url: Url) -> reqwest::RequestBuilder {
        let builder = self.http.get(url);
        match &self.credentials {
            Some(creds) => {
                builder.basic_auth(&creds.username, Some(creds.password.expose_secret()))
            }
            None => builder,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("lumabox-api/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(Error::Transport)
}

/// Descriptor of one device endpoint: host, port, timeout, and the session
/// used to reach it.
#[derive(Debug, Clone)]
pub struct ApiHost {
    host: String,
    port: u16,
    timeout: Duration,
    session: Session,
}

impl ApiHost {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration, session: Session) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
            session,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build a full URL for an API path. Devices speak plain HTTP only.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let path = path.trim_start_matches('/');
        let full = format!("http://{}:{}/{path}", self.host, self.port);
        Url::parse(&full).map_err(Error::InvalidUrl)
    }
}

impl fmt::Display for ApiHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
