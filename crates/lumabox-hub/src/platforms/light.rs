// Light platform
//
// Maps light features onto host light entities: host color modes, the
// mired color-temperature scale, and the turn-on value resolution order
// (explicit raw value, then color temp, then brightness scaling).

use lumabox_api::Device;
use lumabox_api::features::{ColorMode, Light};

use super::{EntityError, entity_id};
use crate::platform::Platform;

// 1,000,000 / 6500 K = 154 mireds; 1,000,000 / 2700 K = 370 mireds.
pub const LIGHT_MIN_MIREDS: u16 = 154;
pub const LIGHT_MAX_MIREDS: u16 = 370;

/// Color mode as the host models it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostColorMode {
    Brightness,
    Rgb,
    Rgbw,
    Rgbww,
    ColorTemp,
}

impl HostColorMode {
    fn from_device(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Mono => Self::Brightness,
            ColorMode::Rgb => Self::Rgb,
            // White channel takes precedence over RGB on RgbOrW hardware,
            // so it presents as RGBW to the host.
            ColorMode::RgbOrW | ColorMode::Rgbw => Self::Rgbw,
            ColorMode::Rgbww => Self::Rgbww,
            ColorMode::Ct | ColorMode::CtX2 => Self::ColorTemp,
        }
    }
}

/// Turn-on parameters; unset fields keep the device's current value.
#[derive(Debug, Clone, Default)]
pub struct LightCommand {
    /// Raw channel value, overriding everything but brightness/effect.
    pub raw: Option<String>,
    pub brightness: Option<u8>,
    pub color_temp_mireds: Option<u16>,
    pub effect: Option<String>,
}

/// One host-facing light entity.
#[derive(Debug, Clone)]
pub struct LightEntity {
    entity_id: String,
    feature: Light,
}

pub fn entities(device: &Device) -> Vec<LightEntity> {
    device
        .capabilities()
        .lights
        .iter()
        .map(|feature| LightEntity {
            entity_id: entity_id(Platform::Light, device.name(), feature.alias()),
            feature: feature.clone(),
        })
        .collect()
}

impl LightEntity {
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn color_mode(&self) -> HostColorMode {
        HostColorMode::from_device(self.feature.mode())
    }

    pub fn effect_list(&self) -> &[String] {
        self.feature.effect_list()
    }

    pub async fn is_on(&self) -> Result<bool, EntityError> {
        Ok(self.feature.state().await?.is_on())
    }

    pub async fn turn_on(&self, cmd: &LightCommand) -> Result<(), EntityError> {
        let feature = &self.feature;
        let mut value = feature.sensible_on_value();

        if let Some(raw) = &cmd.raw {
            value.clone_from(raw);
        }

        if let Some(mireds) = cmd.color_temp_mireds {
            value = ct_value(feature.mode(), color_temp_to_native(mireds));
        }

        if let Some(brightness) = cmd.brightness {
            value = feature.apply_brightness(&value, brightness)?;
        }

        feature.set_raw(&value).await?;

        if let Some(effect) = &cmd.effect {
            let index = feature
                .effect_list()
                .iter()
                .position(|name| name == effect)
                .ok_or_else(|| EntityError::UnknownEffect {
                    entity_id: self.entity_id.clone(),
                    effect: effect.clone(),
                })?;
            feature.set_effect(index).await?;
        }

        Ok(())
    }

    pub async fn turn_off(&self) -> Result<(), EntityError> {
        Ok(self.feature.turn_off().await?)
    }
}

/// Warm/cold channel pair for a native color-temperature value.
fn ct_value(mode: ColorMode, native: u8) -> String {
    let cold = native;
    let warm = u8::MAX - native;
    let pair = format!("{warm:02x}{cold:02x}");
    match mode {
        ColorMode::CtX2 => pair.repeat(2),
        _ => pair,
    }
}

/// Mireds -> native 0-255 scale.
///
/// The supported mired range has fewer integer steps (~216) than the
/// native scale, so this side floors while `color_temp_from_native`
/// ceils; with any other pairing a value read back from the device lands
/// one step away from what was written.
pub fn color_temp_to_native(mireds: u16) -> u8 {
    let span = f64::from(LIGHT_MAX_MIREDS - LIGHT_MIN_MIREDS);
    let scaled = (f64::from(mireds) - f64::from(LIGHT_MIN_MIREDS)) / span * 255.0;
    let bounded = scaled.floor().clamp(0.0, 255.0);
    bounded as u8
}

/// Native 0-255 scale -> mireds. See `color_temp_to_native` for the
/// rounding pairing.
pub fn color_temp_from_native(native: u8) -> u16 {
    let span = f64::from(LIGHT_MAX_MIREDS - LIGHT_MIN_MIREDS);
    let scaled = f64::from(native) / 255.0 * span + f64::from(LIGHT_MIN_MIREDS);
    let bounded = scaled
        .ceil()
        .clamp(f64::from(LIGHT_MIN_MIREDS), f64::from(LIGHT_MAX_MIREDS));
    bounded as u16
}
