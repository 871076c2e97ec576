// Entity platforms
//
// The host groups entities by platform. Setup and unload must forward
// the exact same list, so it lives here as a single constant.

use serde::{Deserialize, Serialize};

/// Host-defined entity category.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Platform {
    BinarySensor,
    Button,
    Climate,
    Cover,
    Light,
    Sensor,
    Switch,
}

/// The platforms this integration forwards, in forwarding order.
/// Unload uses the same list.
pub const PLATFORMS: [Platform; 7] = [
    Platform::BinarySensor,
    Platform::Button,
    Platform::Climate,
    Platform::Cover,
    Platform::Light,
    Platform::Sensor,
    Platform::Switch,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_names_are_snake_case() {
        assert_eq!(Platform::BinarySensor.to_string(), "binary_sensor");
        assert_eq!(Platform::Light.to_string(), "light");
    }

    #[test]
    fn forwarded_list_is_stable() {
        let names: Vec<String> = PLATFORMS.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            ["binary_sensor", "button", "climate", "cover", "light", "sensor", "switch"]
        );
    }
}
