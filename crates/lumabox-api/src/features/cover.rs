// Shutter feature (shutterBox)

use serde::Deserialize;

use crate::client::DeviceClient;
use crate::error::Error;

/// Motion state reported by the shutter controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverState {
    MovingDown,
    MovingUp,
    ManuallyStopped,
    LowerLimit,
    UpperLimit,
    Unknown,
}

impl CoverState {
    fn from_code(code: u8) -> Self {
        match code {
            0 => Self::MovingDown,
            1 => Self::MovingUp,
            2 => Self::ManuallyStopped,
            3 => Self::LowerLimit,
            4 => Self::UpperLimit,
            _ => Self::Unknown,
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, Self::MovingDown | Self::MovingUp)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::LowerLimit)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionWire {
    position: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShutterWire {
    state: u8,
    current_pos: Option<PositionWire>,
    desired_pos: Option<PositionWire>,
}

#[derive(Debug, Deserialize)]
struct ShutterStateEnvelope {
    shutter: ShutterWire,
}

/// Combined state + position snapshot. Positions are percent open
/// (0 = fully closed); the device reports 255 while recalibrating,
/// surfaced here as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverStatus {
    pub state: CoverState,
    pub current_position: Option<u8>,
    pub desired_position: Option<u8>,
}

/// One shutter/awning motor channel.
#[derive(Debug, Clone)]
pub struct Cover {
    client: DeviceClient,
    alias: String,
}

impl Cover {
    pub(crate) fn new(client: DeviceClient, alias: impl Into<String>) -> Self {
        Self {
            client,
            alias: alias.into(),
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub async fn status(&self) -> Result<CoverStatus, Error> {
        let envelope: ShutterStateEnvelope = self.client.get_json("api/shutter/state").await?;
        let shutter = envelope.shutter;
        Ok(CoverStatus {
            state: CoverState::from_code(shutter.state),
            current_position: shutter.current_pos.map(|p| p.position).filter(|&p| p <= 100),
            desired_position: shutter.desired_pos.map(|p| p.position).filter(|&p| p <= 100),
        })
    }

    pub async fn open(&self) -> Result<(), Error> {
        self.client.command("s/u").await
    }

    pub async fn close(&self) -> Result<(), Error> {
        self.client.command("s/d").await
    }

    pub async fn stop(&self) -> Result<(), Error> {
        self.client.command("s/s").await
    }

    /// Move to a position in percent open (0-100).
    pub async fn set_position(&self, position: u8) -> Result<(), Error> {
        if position > 100 {
            return Err(Error::BadValue {
                message: format!("position {position} out of range 0-100"),
            });
        }
        self.client.command(&format!("s/p/{position}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_codes_map() {
        assert_eq!(CoverState::from_code(0), CoverState::MovingDown);
        assert_eq!(CoverState::from_code(4), CoverState::UpperLimit);
        assert_eq!(CoverState::from_code(9), CoverState::Unknown);
        assert!(CoverState::from_code(1).is_moving());
        assert!(CoverState::from_code(3).is_closed());
    }
}
