// Device HTTP client
//
// Wraps an ApiHost with JSON state reads and `/s/...` command sends.
// Feature modules (light, switch, etc.) are built on these two calls;
// this module owns status-code mapping and body parsing.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::Error;
use crate::session::ApiHost;

/// Raw HTTP client for a single Lumabox device.
///
/// Cheap to clone -- every feature handle carries one.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    api: Arc<ApiHost>,
}

impl DeviceClient {
    pub fn new(api: ApiHost) -> Self {
        Self { api: Arc::new(api) }
    }

    /// The endpoint descriptor this client talks to.
    pub fn api(&self) -> &ApiHost {
        &self.api
    }

    /// GET a state path and deserialize the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api.url(path)?;
        debug!("GET {url}");

        let resp = self
            .api
            .session()
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: format!("device rejected request (HTTP {status})"),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Device {
                message: format!("HTTP {status}: {}", &body[..body.len().min(200)]),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    /// Send a `/s/...` command. Lumabox command endpoints are GETs whose
    /// path segments carry the arguments; the reply body is the updated
    /// state, which callers re-fetch when they care.
    pub(crate) async fn command(&self, path: &str) -> Result<(), Error> {
        let url = self.api.url(path)?;
        debug!("command {url}");

        let resp = self
            .api
            .session()
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: format!("device rejected command (HTTP {status})"),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Device {
                message: format!("HTTP {status}: {}", &body[..body.len().min(200)]),
            });
        }

        trace!("command accepted");
        Ok(())
    }

    fn map_transport(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.api.timeout().as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}
