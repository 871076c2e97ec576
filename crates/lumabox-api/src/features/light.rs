// Light feature
//
// Light values are hex strings on the wire: one two-digit pair per
// channel, e.g. "ff0000" for red on an RGB box. The channel count is
// fixed by the color mode, never by the payload.

use serde::Deserialize;

use crate::client::DeviceClient;
use crate::error::Error;

/// Color layout of a light channel set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Single brightness channel.
    Mono,
    Rgb,
    /// RGBW where a non-zero white channel overrides the RGB channels.
    RgbOrW,
    Rgbw,
    Rgbww,
    /// Color temperature: warm + cold white pair.
    Ct,
    /// Two independent color-temperature pairs.
    CtX2,
}

impl ColorMode {
    /// Number of channels (hex pairs) a raw value must carry.
    pub fn channel_count(&self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Ct => 2,
            Self::Rgb => 3,
            Self::RgbOrW | Self::Rgbw | Self::CtX2 => 4,
            Self::Rgbww => 5,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LightWire {
    desired_color: String,
    #[serde(default)]
    effect_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct LightStateEnvelope {
    light: LightWire,
}

/// Current state of a light feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightState {
    /// Raw channel value as sent by the device.
    pub raw: String,
    /// Active effect name, if any.
    pub effect: Option<String>,
}

impl LightState {
    pub fn is_on(&self) -> bool {
        is_lit(&self.raw)
    }
}

/// One controllable light channel set.
#[derive(Debug, Clone)]
pub struct Light {
    client: DeviceClient,
    id: String,
    alias: String,
    mode: ColorMode,
    effects: Vec<String>,
}

impl Light {
    pub(crate) fn new(
        client: DeviceClient,
        id: impl Into<String>,
        alias: impl Into<String>,
        mode: ColorMode,
        effects: Vec<String>,
    ) -> Self {
        Self {
            client,
            id: id.into(),
            alias: alias.into(),
            mode,
            effects,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Effect names supported by the device, in device order.
    pub fn effect_list(&self) -> &[String] {
        &self.effects
    }

    /// Fetch the current light state.
    pub async fn state(&self) -> Result<LightState, Error> {
        let envelope: LightStateEnvelope = self.client.get_json("api/light/state").await?;
        let effect = envelope
            .light
            .effect_id
            .and_then(|idx| self.effects.get(idx as usize).cloned());
        Ok(LightState {
            raw: envelope.light.desired_color,
            effect,
        })
    }

    /// Set the raw channel value. Validates length and hex digits before
    /// touching the network.
    pub async fn set_raw(&self, value: &str) -> Result<(), Error> {
        parse_channels(value, self.mode)?;
        self.client.command(&format!("s/light/{value}")).await
    }

    /// Turn every channel off.
    pub async fn turn_off(&self) -> Result<(), Error> {
        let off = "00".repeat(self.mode.channel_count());
        self.client.command(&format!("s/light/{off}")).await
    }

    /// Activate an effect by its position in [`effect_list`](Self::effect_list).
    pub async fn set_effect(&self, index: usize) -> Result<(), Error> {
        if index >= self.effects.len() {
            return Err(Error::BadValue {
                message: format!(
                    "effect index {index} out of range ({} effects)",
                    self.effects.len()
                ),
            });
        }
        self.client.command(&format!("s/light/effect/{index}")).await
    }

    /// A full-on value for this mode, used when turning on without an
    /// explicit color.
    pub fn sensible_on_value(&self) -> String {
        "ff".repeat(self.mode.channel_count())
    }

    /// Scale every channel of `value` by `brightness` (0-255 = full).
    pub fn apply_brightness(&self, value: &str, brightness: u8) -> Result<String, Error> {
        let channels = parse_channels(value, self.mode)?;
        let scaled: Vec<u8> = channels
            .iter()
            .map(|&ch| scale_channel(ch, brightness))
            .collect();
        Ok(to_hex(&scaled))
    }
}

/// Whether any channel of a raw value is non-zero.
pub fn is_lit(raw: &str) -> bool {
    raw.as_bytes().iter().any(|&b| b != b'0')
}

fn scale_channel(channel: u8, brightness: u8) -> u8 {
    // Round-to-nearest so ff at half brightness is 80, not 7f.
    let product = u32::from(channel) * u32::from(brightness);
    u8::try_from((product + 127) / 255).unwrap_or(u8::MAX)
}

fn parse_channels(value: &str, mode: ColorMode) -> Result<Vec<u8>, Error> {
    if !value.is_ascii() {
        return Err(Error::BadValue {
            message: format!("invalid hex value {value:?}"),
        });
    }

    let expected = mode.channel_count() * 2;
    if value.len() != expected {
        return Err(Error::BadValue {
            message: format!(
                "expected {expected} hex digits for {mode:?}, got {} ({value:?})",
                value.len()
            ),
        });
    }

    (0..value.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&value[i..i + 2], 16).map_err(|_| Error::BadValue {
                message: format!("invalid hex pair in {value:?}"),
            })
        })
        .collect()
}

fn to_hex(channels: &[u8]) -> String {
    channels.iter().map(|ch| format!("{ch:02x}")).collect()
}
