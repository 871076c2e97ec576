// Cover platform

use lumabox_api::Device;
use lumabox_api::features::{Cover, CoverStatus};

use super::{EntityError, entity_id};
use crate::platform::Platform;

/// One host-facing shutter entity.
#[derive(Debug, Clone)]
pub struct CoverEntity {
    entity_id: String,
    feature: Cover,
}

pub fn entities(device: &Device) -> Vec<CoverEntity> {
    device
        .capabilities()
        .covers
        .iter()
        .map(|feature| CoverEntity {
            entity_id: entity_id(Platform::Cover, device.name(), feature.alias()),
            feature: feature.clone(),
        })
        .collect()
}

impl CoverEntity {
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub async fn status(&self) -> Result<CoverStatus, EntityError> {
        Ok(self.feature.status().await?)
    }

    pub async fn open(&self) -> Result<(), EntityError> {
        Ok(self.feature.open().await?)
    }

    pub async fn close(&self) -> Result<(), EntityError> {
        Ok(self.feature.close().await?)
    }

    pub async fn stop(&self) -> Result<(), EntityError> {
        Ok(self.feature.stop().await?)
    }

    /// Percent open, 0-100.
    pub async fn set_position(&self, position: u8) -> Result<(), EntityError> {
        Ok(self.feature.set_position(position).await?)
    }
}
