// Heating feature (thermoBox)
//
// Temperatures are centi-degrees Celsius on the wire (2250 = 22.50 C).

use serde::Deserialize;

use crate::client::DeviceClient;
use crate::error::Error;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThermoSensorWire {
    temp: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeatingWire {
    state: u8,
    desired_temp: i32,
    #[serde(default)]
    maximum_temp: Option<i32>,
    #[serde(default)]
    sensor: Option<ThermoSensorWire>,
}

#[derive(Debug, Deserialize)]
struct ThermoStateEnvelope {
    heating: HeatingWire,
}

/// Snapshot of the heating controller, in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateState {
    pub enabled: bool,
    pub desired_temp: f64,
    pub current_temp: Option<f64>,
    pub max_temp: Option<f64>,
}

/// One heating control channel.
#[derive(Debug, Clone)]
pub struct Climate {
    client: DeviceClient,
    alias: String,
}

impl Climate {
    pub(crate) fn new(client: DeviceClient, alias: impl Into<String>) -> Self {
        Self {
            client,
            alias: alias.into(),
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub async fn state(&self) -> Result<ClimateState, Error> {
        let envelope: ThermoStateEnvelope = self.client.get_json("api/thermo/state").await?;
        let heating = envelope.heating;
        Ok(ClimateState {
            enabled: heating.state == 1,
            desired_temp: centi_to_celsius(heating.desired_temp),
            current_temp: heating.sensor.map(|s| centi_to_celsius(s.temp)),
            max_temp: heating.maximum_temp.map(centi_to_celsius),
        })
    }

    pub async fn enable(&self) -> Result<(), Error> {
        self.client.command("s/1").await
    }

    pub async fn disable(&self) -> Result<(), Error> {
        self.client.command("s/0").await
    }

    /// Set the target temperature in degrees Celsius.
    pub async fn set_target(&self, celsius: f64) -> Result<(), Error> {
        if !(0.0..=125.0).contains(&celsius) {
            return Err(Error::BadValue {
                message: format!("target temperature {celsius} out of range 0-125"),
            });
        }
        let centi = (celsius * 100.0).round() as i64;
        self.client.command(&format!("s/t/{centi}")).await
    }
}

fn centi_to_celsius(centi: i32) -> f64 {
    f64::from(centi) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centi_scaling() {
        assert!((centi_to_celsius(2250) - 22.5).abs() < f64::EPSILON);
        assert!((centi_to_celsius(-500) - -5.0).abs() < f64::EPSILON);
    }
}
