// Sensor platform

use lumabox_api::Device;
use lumabox_api::features::{Sensor, SensorClass, SensorReading};

use super::{EntityError, entity_id};
use crate::dashboards::MeterEntity;
use crate::platform::Platform;

/// One host-facing sensor entity.
#[derive(Debug, Clone)]
pub struct SensorEntity {
    entity_id: String,
    feature: Sensor,
}

pub fn entities(device: &Device) -> Vec<SensorEntity> {
    device
        .capabilities()
        .sensors
        .iter()
        .map(|feature| SensorEntity {
            entity_id: entity_id(Platform::Sensor, device.name(), feature.alias()),
            feature: feature.clone(),
        })
        .collect()
}

/// Dashboard-building descriptions of a device's sensor entities.
pub fn meter_entities(device: &Device) -> Vec<MeterEntity> {
    entities(device)
        .iter()
        .map(SensorEntity::meter_entity)
        .collect()
}

impl SensorEntity {
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn alias(&self) -> &str {
        self.feature.alias()
    }

    pub fn probe_id(&self) -> u32 {
        self.feature.probe_id()
    }

    pub fn device_class(&self) -> SensorClass {
        self.feature.device_class()
    }

    /// Current reading; `None` while the probe is warming up.
    pub async fn read(&self) -> Result<Option<SensorReading>, EntityError> {
        Ok(self.feature.read().await?)
    }

    pub fn meter_entity(&self) -> MeterEntity {
        MeterEntity {
            entity_id: self.entity_id.clone(),
            alias: self.feature.alias().to_owned(),
            probe_id: self.feature.probe_id(),
            device_class: self.feature.device_class(),
        }
    }
}
