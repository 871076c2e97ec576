// Per-capability feature handles.
//
// A feature is one controllable or readable aspect of a device (a light
// channel set, a relay, a sensor probe). Each handle carries the device
// client and knows its own state/command endpoints.

pub mod binary_sensor;
pub mod button;
pub mod climate;
pub mod cover;
pub mod light;
pub mod sensor;
pub mod switch;

pub use binary_sensor::{BinarySensor, BinarySensorKind};
pub use button::{Button, ButtonKind};
pub use climate::{Climate, ClimateState};
pub use cover::{Cover, CoverState, CoverStatus};
pub use light::{ColorMode, Light, LightState};
pub use sensor::{Sensor, SensorClass, SensorReading};
pub use switch::Switch;
