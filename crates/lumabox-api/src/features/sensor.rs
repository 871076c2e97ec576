// Sensor probes (sensorBox, multiSensor, thermoBox's built-in probe)
//
// All probe-bearing devices answer GET api/sensor/state with a flat
// `sensors` array; each entry names its type, probe id, and raw value.

use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::client::DeviceClient;
use crate::error::Error;

/// Measurement class of a probe. Wire names are camelCase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "camelCase")]
pub enum SensorClass {
    Temperature,
    Humidity,
    Wind,
    Illuminance,
    ApparentPower,
    ActivePower,
    ForwardEnergy,
    ReverseEnergy,
}

impl SensorClass {
    /// Centi-scaled classes divide the raw wire value by 100.
    fn scale(&self) -> f64 {
        match self {
            Self::Temperature | Self::Humidity | Self::Wind => 100.0,
            Self::Illuminance
            | Self::ApparentPower
            | Self::ActivePower
            | Self::ForwardEnergy
            | Self::ReverseEnergy => 1.0,
        }
    }

    /// Whether this class measures electrical power.
    pub fn is_power(&self) -> bool {
        matches!(self, Self::ApparentPower | Self::ActivePower)
    }

    /// Whether this class accumulates energy.
    pub fn is_energy(&self) -> bool {
        matches!(self, Self::ForwardEnergy | Self::ReverseEnergy)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProbeWire {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: u32,
    #[serde(default)]
    pub value: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SensorStateEnvelope {
    sensors: Vec<ProbeWire>,
}

/// Fetch the raw probe list, used both for discovery and for reads.
pub(crate) async fn fetch_probes(client: &DeviceClient) -> Result<Vec<ProbeWire>, Error> {
    let envelope: SensorStateEnvelope = client.get_json("api/sensor/state").await?;
    Ok(envelope.sensors)
}

/// A scaled reading from one probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub value: f64,
    pub raw: i64,
}

/// One measurement probe.
#[derive(Debug, Clone)]
pub struct Sensor {
    client: DeviceClient,
    probe_id: u32,
    alias: String,
    device_class: SensorClass,
}

impl Sensor {
    pub(crate) fn new(
        client: DeviceClient,
        probe_id: u32,
        alias: impl Into<String>,
        device_class: SensorClass,
    ) -> Self {
        Self {
            client,
            probe_id,
            alias: alias.into(),
            device_class,
        }
    }

    pub fn probe_id(&self) -> u32 {
        self.probe_id
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn device_class(&self) -> SensorClass {
        self.device_class
    }

    /// Fetch this probe's current reading.
    ///
    /// A probe that is present but warming up reports no value; that is
    /// surfaced as `Ok(None)`, while a probe missing from the reply
    /// entirely is a device error.
    pub async fn read(&self) -> Result<Option<SensorReading>, Error> {
        let probes = fetch_probes(&self.client).await?;
        let wire = probes
            .iter()
            .find(|p| p.id == self.probe_id && p.kind == self.device_class.to_string())
            .ok_or_else(|| Error::Device {
                message: format!(
                    "probe {} ({}) missing from state reply",
                    self.probe_id, self.device_class
                ),
            })?;

        Ok(wire.value.map(|raw| SensorReading {
            value: raw as f64 / self.device_class.scale(),
            raw,
        }))
    }
}

/// Build sensor handles from a probe list, skipping classes this client
/// does not model.
pub(crate) fn sensors_from_probes(client: &DeviceClient, probes: &[ProbeWire]) -> Vec<Sensor> {
    probes
        .iter()
        .filter_map(|probe| match SensorClass::from_str(&probe.kind) {
            Ok(class) => Some(Sensor::new(
                client.clone(),
                probe.id,
                format!("{}{}", probe.kind, probe.id),
                class,
            )),
            Err(_) => {
                debug!(kind = %probe.kind, id = probe.id, "skipping unknown probe type");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn class_wire_names_are_camel_case() {
        assert_eq!(SensorClass::Temperature.to_string(), "temperature");
        assert_eq!(SensorClass::ApparentPower.to_string(), "apparentPower");
        assert_eq!(
            SensorClass::from_str("forwardEnergy").unwrap(),
            SensorClass::ForwardEnergy
        );
        assert!(SensorClass::from_str("sharknado").is_err());
    }

    #[test]
    fn centi_classes_scale_down() {
        assert!((SensorClass::Temperature.scale() - 100.0).abs() < f64::EPSILON);
        assert!((SensorClass::ApparentPower.scale() - 1.0).abs() < f64::EPSILON);
    }
}
