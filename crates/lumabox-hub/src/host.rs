// Host platform seam
//
// Everything the host application does on the integration's behalf --
// forwarding entity setup to platforms, storing dashboards -- goes
// through these traits. Failures on the host side are opaque to the
// integration and propagate unchanged.

use async_trait::async_trait;

use crate::dashboards::Dashboard;
use crate::entry::ConfigEntry;
use crate::platform::Platform;

/// Opaque error from the host side of the seam.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Entity-platform lifecycle owned by the host.
#[async_trait]
pub trait PlatformHost: Send + Sync {
    /// Forward entry setup to the listed platforms, in order.
    async fn forward_setups(
        &self,
        entry: &ConfigEntry,
        platforms: &[Platform],
    ) -> Result<(), HostError>;

    /// Unload the listed platforms for an entry. `Ok(false)` means the
    /// host declined the unload (entities still in use); the caller keeps
    /// the device handle in that case.
    async fn unload_platforms(
        &self,
        entry: &ConfigEntry,
        platforms: &[Platform],
    ) -> Result<bool, HostError>;
}

/// Dashboard storage owned by the host's visualization subsystem.
#[async_trait]
pub trait DashboardHost: Send + Sync {
    async fn create_dashboard(&self, dashboard: Dashboard) -> Result<(), HostError>;
}

#[async_trait]
impl<T: DashboardHost + ?Sized> DashboardHost for std::sync::Arc<T> {
    async fn create_dashboard(&self, dashboard: Dashboard) -> Result<(), HostError> {
        (**self).create_dashboard(dashboard).await
    }
}
