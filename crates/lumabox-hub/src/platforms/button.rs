// Button platform

use lumabox_api::Device;
use lumabox_api::features::{Button, ButtonKind};

use super::{EntityError, entity_id};
use crate::platform::Platform;

/// One host-facing trigger entity.
#[derive(Debug, Clone)]
pub struct ButtonEntity {
    entity_id: String,
    feature: Button,
}

pub fn entities(device: &Device) -> Vec<ButtonEntity> {
    device
        .capabilities()
        .buttons
        .iter()
        .map(|feature| ButtonEntity {
            entity_id: entity_id(Platform::Button, device.name(), feature.alias()),
            feature: feature.clone(),
        })
        .collect()
}

impl ButtonEntity {
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn kind(&self) -> ButtonKind {
        self.feature.kind()
    }

    pub async fn press(&self) -> Result<(), EntityError> {
        Ok(self.feature.press().await?)
    }
}
