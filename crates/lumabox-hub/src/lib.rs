// lumabox-hub: glue between Lumabox devices and a host automation platform.
//
// The host owns config entries, entity platforms, actions, and dashboards;
// this crate owns the device session bootstrap, the per-entry device
// registry, and the per-platform entity builders. Everything host-shaped
// sits behind the traits in `host`.

pub mod action;
pub mod context;
pub mod dashboards;
pub mod entry;
pub mod error;
pub mod host;
pub mod platform;
pub mod platforms;
pub mod registry;
pub mod setup;

pub use action::{ActionRegistry, DASHBOARD_ACTION, register_dashboard_action};
pub use context::HubContext;
pub use entry::{ConfigEntry, DEFAULT_SETUP_TIMEOUT, DOMAIN, EntryId};
pub use error::HubError;
pub use host::{DashboardHost, HostError, PlatformHost};
pub use platform::{PLATFORMS, Platform};
pub use registry::DeviceRegistry;
pub use setup::{setup_entry, unload_entry};
