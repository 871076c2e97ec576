// Relay feature (switchBox, switchBoxD)

use serde::Deserialize;

use crate::client::DeviceClient;
use crate::error::Error;

#[derive(Debug, Deserialize)]
struct RelayWire {
    relay: u8,
    state: u8,
}

#[derive(Debug, Deserialize)]
struct RelayStateEnvelope {
    relays: Vec<RelayWire>,
}

/// One relay channel.
#[derive(Debug, Clone)]
pub struct Switch {
    client: DeviceClient,
    index: u8,
    alias: String,
}

impl Switch {
    pub(crate) fn new(client: DeviceClient, index: u8, alias: impl Into<String>) -> Self {
        Self {
            client,
            index,
            alias: alias.into(),
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Fetch the relay's current state.
    pub async fn is_on(&self) -> Result<bool, Error> {
        let envelope: RelayStateEnvelope = self.client.get_json("api/relay/state").await?;
        envelope
            .relays
            .iter()
            .find(|r| r.relay == self.index)
            .map(|r| r.state == 1)
            .ok_or_else(|| Error::Device {
                message: format!("relay {} missing from state reply", self.index),
            })
    }

    pub async fn turn_on(&self) -> Result<(), Error> {
        self.client
            .command(&format!("s/relay/{}/1", self.index))
            .await
    }

    pub async fn turn_off(&self) -> Result<(), Error> {
        self.client
            .command(&format!("s/relay/{}/0", self.index))
            .await
    }
}
