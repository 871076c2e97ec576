// Device identification
//
// `Device::identify` is the single entry point callers await: one /info
// round trip, a family + API level check, then capability discovery.
// The returned handle is the "identified device" the integration stores.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capability::{self, CapabilitySet};
use crate::client::DeviceClient;
use crate::error::Error;
use crate::family::DeviceFamily;
use crate::session::ApiHost;

/// Factory-assigned device identifier (hex serial from /info).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DeviceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Static device description from the /info endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub id: DeviceId,
    #[serde(rename = "fv", default)]
    pub firmware_version: Option<String>,
    #[serde(rename = "hv", default)]
    pub hardware_version: Option<String>,
    /// Date-shaped integer (YYYYMMDD). Missing on pre-versioning firmware.
    #[serde(default)]
    pub api_level: Option<u32>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfoEnvelope {
    device: DeviceInfo,
}

/// An identified Lumabox device: static info, resolved family, and the
/// discovered capability set.
#[derive(Debug, Clone)]
pub struct Device {
    info: DeviceInfo,
    family: DeviceFamily,
    client: DeviceClient,
    capabilities: CapabilitySet,
}

impl Device {
    /// Identify the device behind `api`.
    ///
    /// Fetches /info, resolves the product family, rejects firmware older
    /// than the family's minimum API level, and discovers capabilities.
    /// Missing API levels count as level 0.
    pub async fn identify(api: ApiHost) -> Result<Self, Error> {
        let client = DeviceClient::new(api);

        let envelope: InfoEnvelope = client.get_json("info").await?;
        let info = envelope.device;

        let family = DeviceFamily::from_type(&info.device_type).ok_or_else(|| {
            Error::UnsupportedDevice {
                device_type: info.device_type.clone(),
            }
        })?;

        let api_level = info.api_level.unwrap_or(0);
        let min_supported = family.min_api_level();
        if api_level < min_supported {
            return Err(Error::UnsupportedVersion {
                api_level,
                min_supported,
            });
        }

        let capabilities = capability::discover(family, &info, &client).await?;

        debug!(
            device = %info.device_name,
            id = %info.id,
            family = %family,
            api_level,
            "identified device"
        );

        Ok(Self {
            info,
            family,
            client,
            capabilities,
        })
    }

    pub fn id(&self) -> &DeviceId {
        &self.info.id
    }

    pub fn name(&self) -> &str {
        &self.info.device_name
    }

    pub fn family(&self) -> DeviceFamily {
        self.family
    }

    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// The endpoint this device was identified at.
    pub fn api(&self) -> &ApiHost {
        self.client.api()
    }
}
