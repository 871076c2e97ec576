// Hub context
//
// Explicit state object owned by the host application and passed into
// setup/unload. Holds what the integration needs to remember between
// calls -- today, only the device registry.

use crate::registry::DeviceRegistry;

/// Integration-wide state, created once by the host and shared across
/// all entry setups.
#[derive(Debug, Default)]
pub struct HubContext {
    registry: DeviceRegistry,
}

impl HubContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }
}
