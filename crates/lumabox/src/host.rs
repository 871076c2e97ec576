//! Reference host implementations of the hub's seam traits.
//!
//! The logging platform host materializes entities for each forwarded
//! platform and logs them; the dashboard store keeps created dashboards
//! in memory and prints them.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, info};

use lumabox_hub::dashboards::Dashboard;
use lumabox_hub::{ConfigEntry, DashboardHost, HostError, HubContext, Platform, PlatformHost, platforms};

/// Platform host that builds entities and logs them instead of handing
/// them to a real entity framework.
pub struct LoggingHost {
    ctx: Arc<HubContext>,
}

impl LoggingHost {
    pub fn new(ctx: Arc<HubContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl PlatformHost for LoggingHost {
    async fn forward_setups(
        &self,
        entry: &ConfigEntry,
        platforms_list: &[Platform],
    ) -> Result<(), HostError> {
        let device = self
            .ctx
            .registry()
            .device(&entry.id)
            .ok_or_else(|| HostError::new(format!("no device stored for entry '{}'", entry.id)))?;

        for &platform in platforms_list {
            let ids = platforms::entity_ids(platform, &device);
            if ids.is_empty() {
                debug!(%platform, "no entities for platform");
            } else {
                info!(%platform, entities = ?ids, "entities ready");
            }
        }
        Ok(())
    }

    async fn unload_platforms(
        &self,
        entry: &ConfigEntry,
        platforms_list: &[Platform],
    ) -> Result<bool, HostError> {
        info!(entry = %entry.id, count = platforms_list.len(), "unloading platforms");
        Ok(true)
    }
}

/// In-memory dashboard store that pretty-prints every created dashboard.
#[derive(Default)]
pub struct MemoryDashboards {
    created: Mutex<Vec<Dashboard>>,
}

impl MemoryDashboards {
    pub fn created(&self) -> Vec<Dashboard> {
        self.created.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl DashboardHost for MemoryDashboards {
    async fn create_dashboard(&self, dashboard: Dashboard) -> Result<(), HostError> {
        let rendered = serde_json::to_string_pretty(&dashboard)
            .map_err(|e| HostError::with_source("dashboard serialization failed", e))?;
        println!("{rendered}");

        self.created
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(dashboard);
        Ok(())
    }
}
