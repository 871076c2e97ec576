// Binary sensor platform

use lumabox_api::Device;
use lumabox_api::features::{BinarySensor, BinarySensorKind};

use super::{EntityError, entity_id};
use crate::platform::Platform;

/// One host-facing binary sensor entity.
#[derive(Debug, Clone)]
pub struct BinarySensorEntity {
    entity_id: String,
    feature: BinarySensor,
}

pub fn entities(device: &Device) -> Vec<BinarySensorEntity> {
    device
        .capabilities()
        .binary_sensors
        .iter()
        .map(|feature| BinarySensorEntity {
            entity_id: entity_id(Platform::BinarySensor, device.name(), feature.alias()),
            feature: feature.clone(),
        })
        .collect()
}

impl BinarySensorEntity {
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn kind(&self) -> BinarySensorKind {
        self.feature.kind()
    }

    pub async fn is_on(&self) -> Result<bool, EntityError> {
        Ok(self.feature.is_active().await?)
    }
}
