// Device families
//
// Every Lumabox product is a single-purpose box; the `type` field of the
// /info reply names its family, and the family fixes the capability set.
// API levels gate firmware generations -- a family's minimum is the
// oldest wire format this client still parses.

use std::fmt;

/// Known Lumabox product families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DeviceFamily {
    /// RGBW strip/bulb controller.
    LightBox,
    /// Single-channel dimmer.
    DimBox,
    /// Single relay.
    SwitchBox,
    /// Dual relay.
    SwitchBoxD,
    /// Roller shutter / awning motor controller.
    ShutterBox,
    /// Heating controller with one temperature probe.
    ThermoBox,
    /// Standalone temperature probe.
    SensorBox,
    /// Multi-probe sensor hub (temperature, humidity, power metering).
    MultiSensor,
    /// Gate/garage controller with position feedback.
    GateBox,
}

impl DeviceFamily {
    /// Resolve a family from the `type` field of the /info reply.
    pub fn from_type(device_type: &str) -> Option<Self> {
        match device_type {
            "lightBox" => Some(Self::LightBox),
            "dimBox" => Some(Self::DimBox),
            "switchBox" => Some(Self::SwitchBox),
            "switchBoxD" => Some(Self::SwitchBoxD),
            "shutterBox" => Some(Self::ShutterBox),
            "thermoBox" => Some(Self::ThermoBox),
            "sensorBox" => Some(Self::SensorBox),
            "multiSensor" => Some(Self::MultiSensor),
            "gateBox" => Some(Self::GateBox),
            _ => None,
        }
    }

    /// The wire name of this family.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::LightBox => "lightBox",
            Self::DimBox => "dimBox",
            Self::SwitchBox => "switchBox",
            Self::SwitchBoxD => "switchBoxD",
            Self::ShutterBox => "shutterBox",
            Self::ThermoBox => "thermoBox",
            Self::SensorBox => "sensorBox",
            Self::MultiSensor => "multiSensor",
            Self::GateBox => "gateBox",
        }
    }

    /// Oldest API level this client can still talk to.
    ///
    /// Devices report their level as a date-shaped integer (YYYYMMDD).
    /// A missing level is treated as pre-versioning firmware and rejected
    /// for families that grew incompatible formats.
    pub fn min_api_level(&self) -> u32 {
        match self {
            Self::LightBox | Self::DimBox => 20180201,
            Self::SwitchBox | Self::SwitchBoxD => 20180604,
            Self::ShutterBox => 20190911,
            Self::ThermoBox => 20180604,
            Self::SensorBox => 20180604,
            Self::MultiSensor => 20210413,
            Self::GateBox => 20180604,
        }
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
