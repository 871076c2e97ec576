// Button feature (gateBox trigger outputs)

use crate::client::DeviceClient;
use crate::error::Error;

/// Which trigger output a button fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Main gate trigger.
    Primary,
    /// Secondary output (wicket lock, light, etc.), present on newer
    /// gateBox revisions.
    Secondary,
}

/// One momentary trigger.
#[derive(Debug, Clone)]
pub struct Button {
    client: DeviceClient,
    alias: String,
    kind: ButtonKind,
}

impl Button {
    pub(crate) fn new(client: DeviceClient, alias: impl Into<String>, kind: ButtonKind) -> Self {
        Self {
            client,
            alias: alias.into(),
            kind,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    /// Fire the trigger.
    pub async fn press(&self) -> Result<(), Error> {
        let path = match self.kind {
            ButtonKind::Primary => "s/p",
            ButtonKind::Secondary => "s/s",
        };
        self.client.command(path).await
    }
}
