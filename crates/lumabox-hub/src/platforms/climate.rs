// Climate platform

use lumabox_api::Device;
use lumabox_api::features::{Climate, ClimateState};

use super::{EntityError, entity_id};
use crate::platform::Platform;

/// One host-facing heating entity.
#[derive(Debug, Clone)]
pub struct ClimateEntity {
    entity_id: String,
    feature: Climate,
}

pub fn entities(device: &Device) -> Vec<ClimateEntity> {
    device
        .capabilities()
        .climates
        .iter()
        .map(|feature| ClimateEntity {
            entity_id: entity_id(Platform::Climate, device.name(), feature.alias()),
            feature: feature.clone(),
        })
        .collect()
}

impl ClimateEntity {
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub async fn state(&self) -> Result<ClimateState, EntityError> {
        Ok(self.feature.state().await?)
    }

    pub async fn turn_on(&self) -> Result<(), EntityError> {
        Ok(self.feature.enable().await?)
    }

    pub async fn turn_off(&self) -> Result<(), EntityError> {
        Ok(self.feature.disable().await?)
    }

    /// Target temperature in degrees Celsius.
    pub async fn set_temperature(&self, celsius: f64) -> Result<(), EntityError> {
        Ok(self.feature.set_target(celsius).await?)
    }
}
