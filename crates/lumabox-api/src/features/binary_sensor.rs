// Binary sensor feature (gateBox position feedback)

use serde::Deserialize;

use crate::client::DeviceClient;
use crate::error::Error;

/// What a binary sensor reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BinarySensorKind {
    /// Gate/garage door is not fully closed.
    GateOpen,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GateWire {
    current_pos: u8,
}

#[derive(Debug, Deserialize)]
struct GateStateEnvelope {
    gate: GateWire,
}

/// One on/off observation channel.
#[derive(Debug, Clone)]
pub struct BinarySensor {
    client: DeviceClient,
    alias: String,
    kind: BinarySensorKind,
}

impl BinarySensor {
    pub(crate) fn new(
        client: DeviceClient,
        alias: impl Into<String>,
        kind: BinarySensorKind,
    ) -> Self {
        Self {
            client,
            alias: alias.into(),
            kind,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn kind(&self) -> BinarySensorKind {
        self.kind
    }

    /// Whether the observed condition currently holds.
    pub async fn is_active(&self) -> Result<bool, Error> {
        match self.kind {
            BinarySensorKind::GateOpen => {
                let envelope: GateStateEnvelope = self.client.get_json("api/gate/state").await?;
                Ok(envelope.gate.current_pos > 0)
            }
        }
    }
}
