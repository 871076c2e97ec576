// Capability discovery
//
// Performed once at identification time. The family fixes which feature
// kinds exist; multiSensor additionally enumerates its probes over the
// wire because the probe mix is per-installation, not per-family.

use tracing::debug;

use crate::client::DeviceClient;
use crate::device::DeviceInfo;
use crate::error::Error;
use crate::family::DeviceFamily;
use crate::features::{
    BinarySensor, BinarySensorKind, Button, ButtonKind, Climate, ColorMode, Cover, Light, Sensor,
    SensorClass, Switch,
};
use crate::features::sensor;

/// Built-in effect table for lightBox firmware.
const LIGHT_EFFECTS: [&str; 5] = ["none", "fade", "blink", "candle", "police"];

/// Everything a device can do, discovered once and queried per platform
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct CapabilitySet {
    pub lights: Vec<Light>,
    pub switches: Vec<Switch>,
    pub covers: Vec<Cover>,
    pub climates: Vec<Climate>,
    pub sensors: Vec<Sensor>,
    pub binary_sensors: Vec<BinarySensor>,
    pub buttons: Vec<Button>,
}

impl CapabilitySet {
    pub fn is_empty(&self) -> bool {
        self.feature_count() == 0
    }

    pub fn feature_count(&self) -> usize {
        self.lights.len()
            + self.switches.len()
            + self.covers.len()
            + self.climates.len()
            + self.sensors.len()
            + self.binary_sensors.len()
            + self.buttons.len()
    }
}

pub(crate) async fn discover(
    family: DeviceFamily,
    info: &DeviceInfo,
    client: &DeviceClient,
) -> Result<CapabilitySet, Error> {
    let mut caps = CapabilitySet::default();

    match family {
        DeviceFamily::LightBox => {
            let effects = LIGHT_EFFECTS.iter().map(|&e| e.to_owned()).collect();
            caps.lights.push(Light::new(
                client.clone(),
                "color",
                "color",
                ColorMode::Rgbw,
                effects,
            ));
        }
        DeviceFamily::DimBox => {
            caps.lights.push(Light::new(
                client.clone(),
                "brightness",
                "brightness",
                ColorMode::Mono,
                Vec::new(),
            ));
        }
        DeviceFamily::SwitchBox => {
            caps.switches.push(Switch::new(client.clone(), 0, "relay"));
        }
        DeviceFamily::SwitchBoxD => {
            caps.switches.push(Switch::new(client.clone(), 0, "relay0"));
            caps.switches.push(Switch::new(client.clone(), 1, "relay1"));
        }
        DeviceFamily::ShutterBox => {
            caps.covers.push(Cover::new(client.clone(), "shutter"));
        }
        DeviceFamily::ThermoBox => {
            caps.climates
                .push(Climate::new(client.clone(), "thermostat"));
            caps.sensors.push(Sensor::new(
                client.clone(),
                0,
                "temperature0",
                SensorClass::Temperature,
            ));
        }
        DeviceFamily::SensorBox => {
            caps.sensors.push(Sensor::new(
                client.clone(),
                0,
                "temperature0",
                SensorClass::Temperature,
            ));
        }
        DeviceFamily::MultiSensor => {
            let probes = sensor::fetch_probes(client).await?;
            caps.sensors = sensor::sensors_from_probes(client, &probes);
        }
        DeviceFamily::GateBox => {
            caps.binary_sensors.push(BinarySensor::new(
                client.clone(),
                "gate",
                BinarySensorKind::GateOpen,
            ));
            caps.buttons
                .push(Button::new(client.clone(), "primary", ButtonKind::Primary));
            caps.buttons.push(Button::new(
                client.clone(),
                "secondary",
                ButtonKind::Secondary,
            ));
        }
    }

    debug!(
        device = %info.device_name,
        features = caps.feature_count(),
        "capability discovery complete"
    );

    Ok(caps)
}
