// Switch platform

use lumabox_api::Device;
use lumabox_api::features::Switch;

use super::{EntityError, entity_id};
use crate::platform::Platform;

/// One host-facing relay entity.
#[derive(Debug, Clone)]
pub struct SwitchEntity {
    entity_id: String,
    feature: Switch,
}

pub fn entities(device: &Device) -> Vec<SwitchEntity> {
    device
        .capabilities()
        .switches
        .iter()
        .map(|feature| SwitchEntity {
            entity_id: entity_id(Platform::Switch, device.name(), feature.alias()),
            feature: feature.clone(),
        })
        .collect()
}

impl SwitchEntity {
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub async fn is_on(&self) -> Result<bool, EntityError> {
        Ok(self.feature.is_on().await?)
    }

    pub async fn turn_on(&self) -> Result<(), EntityError> {
        Ok(self.feature.turn_on().await?)
    }

    pub async fn turn_off(&self) -> Result<(), EntityError> {
        Ok(self.feature.turn_off().await?)
    }
}
