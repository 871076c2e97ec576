// Entry setup and teardown
//
// The only suspension points are the identification call and the host
// forwarding calls, awaited in sequence. No retry here: a NotReady
// outcome tells the host to call setup_entry again later.

use std::sync::Arc;

use tracing::{debug, error, info};

use lumabox_api::{ApiHost, Device, Session};

use crate::context::HubContext;
use crate::entry::{ConfigEntry, DEFAULT_SETUP_TIMEOUT};
use crate::error::HubError;
use crate::host::PlatformHost;
use crate::platform::PLATFORMS;

/// Set up one config entry: open a session, identify the device, store
/// the handle, forward to platforms.
///
/// On identification failure nothing is stored and the error is the
/// retryable [`HubError::NotReady`]. A successful call stores exactly one
/// handle for the entry before forwarding begins.
pub async fn setup_entry(
    ctx: &HubContext,
    host: &dyn PlatformHost,
    entry: &ConfigEntry,
) -> Result<(), HubError> {
    let session = match Session::maybe_authenticated(
        entry.username.as_deref(),
        entry.password.clone(),
        DEFAULT_SETUP_TIMEOUT,
    ) {
        Ok(session) => session,
        Err(source) => return Err(not_ready(entry, source)),
    };

    let api = ApiHost::new(&entry.host, entry.port, DEFAULT_SETUP_TIMEOUT, session);

    let device = match Device::identify(api).await {
        Ok(device) => device,
        Err(source) => return Err(not_ready(entry, source)),
    };

    info!(
        entry = %entry.id,
        device = device.name(),
        family = %device.family(),
        "device identified"
    );

    ctx.registry().insert(entry.id.clone(), Arc::new(device));

    host.forward_setups(entry, &PLATFORMS).await?;

    Ok(())
}

/// Tear down one config entry: unload the forwarded platforms and, only
/// if the host agreed, drop the stored handle.
///
/// A declined unload (`Ok(false)`) or a host error leaves the handle in
/// place so the host can retry teardown.
pub async fn unload_entry(
    ctx: &HubContext,
    host: &dyn PlatformHost,
    entry: &ConfigEntry,
) -> Result<bool, HubError> {
    let unload_ok = host.unload_platforms(entry, &PLATFORMS).await?;

    if unload_ok {
        ctx.registry().remove(&entry.id);
        debug!(entry = %entry.id, "entry unloaded");
    }

    Ok(unload_ok)
}

fn not_ready(entry: &ConfigEntry, source: lumabox_api::Error) -> HubError {
    error!(
        host = %entry.host,
        port = entry.port,
        error = %source,
        "device identification failed"
    );
    HubError::NotReady {
        host: entry.host.clone(),
        port: entry.port,
        source,
    }
}
