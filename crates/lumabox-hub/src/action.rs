// Administrative actions
//
// The integration registers exactly one action at load time: `dashboard`,
// which materializes the fixed energy-dashboard template for every stored
// device. Invocation failures propagate to the caller unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::context::HubContext;
use crate::dashboards;
use crate::entry::DOMAIN;
use crate::host::{DashboardHost, HostError};

/// Name of the action registered under the integration domain.
pub const DASHBOARD_ACTION: &str = "dashboard";

/// A named callback invocable through the host's action registry.
#[async_trait]
pub trait Action: Send + Sync {
    async fn invoke(&self) -> Result<(), HostError>;
}

/// Host-side action registry, keyed by (domain, action name).
#[derive(Default)]
pub struct ActionRegistry {
    actions: DashMap<(String, String), Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action, replacing any previous registration under the
    /// same name.
    pub fn register(&self, domain: &str, name: &str, action: Arc<dyn Action>) {
        debug!(domain, name, "registering action");
        self.actions
            .insert((domain.to_owned(), name.to_owned()), action);
    }

    pub fn contains(&self, domain: &str, name: &str) -> bool {
        self.actions
            .contains_key(&(domain.to_owned(), name.to_owned()))
    }

    /// Invoke a registered action by name.
    pub async fn invoke(&self, domain: &str, name: &str) -> Result<(), HostError> {
        let action = self
            .actions
            .get(&(domain.to_owned(), name.to_owned()))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| HostError::new(format!("no action '{domain}.{name}' registered")))?;

        action.invoke().await
    }
}

struct DashboardAction<D> {
    ctx: Arc<HubContext>,
    dashboards: D,
}

#[async_trait]
impl<D: DashboardHost> Action for DashboardAction<D> {
    async fn invoke(&self) -> Result<(), HostError> {
        for (entry_id, _device) in self.ctx.registry().devices() {
            self.dashboards
                .create_dashboard(dashboards::energy_dashboard(&entry_id))
                .await?;
        }
        Ok(())
    }
}

/// Integration-load hook: register the `dashboard` action. The host calls
/// this once, before any entry setup.
pub fn register_dashboard_action<D: DashboardHost + 'static>(
    registry: &ActionRegistry,
    ctx: Arc<HubContext>,
    dashboards: D,
) {
    registry.register(
        DOMAIN,
        DASHBOARD_ACTION,
        Arc::new(DashboardAction { ctx, dashboards }),
    );
}
