// Entry setup/teardown lifecycle tests, with wiremock standing in for
// the device and a recording host standing in for the platform side.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lumabox_hub::dashboards::{Dashboard, FIXED_BADGE_ENTITY};
use lumabox_hub::{
    ActionRegistry, ConfigEntry, DASHBOARD_ACTION, DOMAIN, DashboardHost, HostError, HubContext,
    HubError, PLATFORMS, Platform, PlatformHost, register_dashboard_action, setup_entry,
    unload_entry,
};

// ── Test doubles ────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingHost {
    forwarded: Mutex<Vec<Vec<Platform>>>,
    unloaded: Mutex<Vec<Vec<Platform>>>,
    fail_forward: bool,
    fail_unload: bool,
    decline_unload: bool,
}

impl RecordingHost {
    fn forward_calls(&self) -> Vec<Vec<Platform>> {
        self.forwarded.lock().unwrap().clone()
    }

    fn unload_calls(&self) -> Vec<Vec<Platform>> {
        self.unloaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformHost for RecordingHost {
    async fn forward_setups(
        &self,
        _entry: &ConfigEntry,
        platforms: &[Platform],
    ) -> Result<(), HostError> {
        self.forwarded.lock().unwrap().push(platforms.to_vec());
        if self.fail_forward {
            return Err(HostError::new("platform setup failed"));
        }
        Ok(())
    }

    async fn unload_platforms(
        &self,
        _entry: &ConfigEntry,
        platforms: &[Platform],
    ) -> Result<bool, HostError> {
        self.unloaded.lock().unwrap().push(platforms.to_vec());
        if self.fail_unload {
            return Err(HostError::new("platform unload failed"));
        }
        Ok(!self.decline_unload)
    }
}

#[derive(Default)]
struct RecordingDashboards {
    created: Arc<Mutex<Vec<Dashboard>>>,
}

#[async_trait]
impl DashboardHost for RecordingDashboards {
    async fn create_dashboard(&self, dashboard: Dashboard) -> Result<(), HostError> {
        self.created.lock().unwrap().push(dashboard);
        Ok(())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

async fn mock_device(device_type: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device": {
                "deviceName": format!("My {device_type}"),
                "type": device_type,
                "id": "6334f7e3a871",
                "fv": "0.987",
                "hv": "4.3",
                "apiLevel": 20210413
            }
        })))
        .mount(&server)
        .await;
    server
}

fn entry_for(server: &MockServer, id: &str) -> ConfigEntry {
    let addr = server.address();
    let mut entry = ConfigEntry::new(id, format!("Entry {id}"), addr.ip().to_string());
    entry.port = addr.port();
    entry
}

// ── Setup ───────────────────────────────────────────────────────────

#[tokio::test]
async fn setup_stores_one_handle_and_forwards_fixed_platform_list() {
    let server = mock_device("switchBox").await;
    let ctx = HubContext::new();
    let host = RecordingHost::default();
    let entry = entry_for(&server, "entry-1");

    setup_entry(&ctx, &host, &entry).await.unwrap();

    assert_eq!(ctx.registry().len(), 1);
    let device = ctx.registry().device(&entry.id).expect("handle stored");
    assert_eq!(device.name(), "My switchBox");

    // Exactly one forward call, with the full fixed list in order.
    assert_eq!(host.forward_calls(), vec![PLATFORMS.to_vec()]);
}

#[tokio::test]
async fn setup_failure_is_retryable_and_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let ctx = HubContext::new();
    let host = RecordingHost::default();
    let entry = entry_for(&server, "entry-1");

    let err = setup_entry(&ctx, &host, &entry).await.unwrap_err();

    assert!(err.is_retryable());
    assert!(matches!(err, HubError::NotReady { .. }));
    // The message carries host and port for the operator.
    let text = err.to_string();
    assert!(text.contains(&entry.host));
    assert!(text.contains(&entry.port.to_string()));

    assert!(ctx.registry().is_empty());
    assert!(host.forward_calls().is_empty());
}

#[tokio::test]
async fn setup_twice_keeps_a_single_handle() {
    let server = mock_device("switchBox").await;
    let ctx = HubContext::new();
    let host = RecordingHost::default();
    let entry = entry_for(&server, "entry-1");

    setup_entry(&ctx, &host, &entry).await.unwrap();
    setup_entry(&ctx, &host, &entry).await.unwrap();

    assert_eq!(ctx.registry().len(), 1);
    assert_eq!(host.forward_calls().len(), 2);
}

#[tokio::test]
async fn forward_failure_propagates_and_keeps_handle() {
    let server = mock_device("switchBox").await;
    let ctx = HubContext::new();
    let host = RecordingHost {
        fail_forward: true,
        ..RecordingHost::default()
    };
    let entry = entry_for(&server, "entry-1");

    let err = setup_entry(&ctx, &host, &entry).await.unwrap_err();

    assert!(matches!(err, HubError::Host(_)));
    assert!(!err.is_retryable());
    // Identification succeeded, so the handle stays for the host to
    // retry/unload against.
    assert!(ctx.registry().contains(&entry.id));
}

// ── Teardown ────────────────────────────────────────────────────────

#[tokio::test]
async fn unload_success_removes_handle() {
    let server = mock_device("shutterBox").await;
    let ctx = HubContext::new();
    let host = RecordingHost::default();
    let entry = entry_for(&server, "entry-1");

    setup_entry(&ctx, &host, &entry).await.unwrap();
    assert!(ctx.registry().contains(&entry.id));

    let unloaded = unload_entry(&ctx, &host, &entry).await.unwrap();

    assert!(unloaded);
    assert!(ctx.registry().is_empty());
    assert_eq!(host.unload_calls(), vec![PLATFORMS.to_vec()]);
}

#[tokio::test]
async fn declined_unload_keeps_handle() {
    let server = mock_device("switchBox").await;
    let ctx = HubContext::new();
    let host = RecordingHost {
        decline_unload: true,
        ..RecordingHost::default()
    };
    let entry = entry_for(&server, "entry-1");

    setup_entry(&ctx, &host, &entry).await.unwrap();
    let unloaded = unload_entry(&ctx, &host, &entry).await.unwrap();

    assert!(!unloaded);
    assert!(ctx.registry().contains(&entry.id));
}

#[tokio::test]
async fn unload_host_error_keeps_handle() {
    let server = mock_device("switchBox").await;
    let ctx = HubContext::new();
    let ok_host = RecordingHost::default();
    let entry = entry_for(&server, "entry-1");

    setup_entry(&ctx, &ok_host, &entry).await.unwrap();

    let failing_host = RecordingHost {
        fail_unload: true,
        ..RecordingHost::default()
    };
    let err = unload_entry(&ctx, &failing_host, &entry).await.unwrap_err();

    assert!(matches!(err, HubError::Host(_)));
    assert!(ctx.registry().contains(&entry.id));
}

#[tokio::test]
async fn unload_of_absent_entry_still_calls_host() {
    let ctx = HubContext::new();
    let host = RecordingHost::default();
    let entry = ConfigEntry::new("never-set-up", "Ghost", "10.0.0.5");

    let unloaded = unload_entry(&ctx, &host, &entry).await.unwrap();

    // The host call happened and removal of the missing key was a no-op.
    assert!(unloaded);
    assert_eq!(host.unload_calls().len(), 1);
    assert!(ctx.registry().is_empty());
}

// ── Dashboard action ────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_action_creates_fixed_template_per_device() {
    let server_a = mock_device("switchBox").await;
    let server_b = mock_device("lightBox").await;

    let ctx = Arc::new(HubContext::new());
    let host = RecordingHost::default();

    setup_entry(&ctx, &host, &entry_for(&server_a, "entry-a"))
        .await
        .unwrap();
    setup_entry(&ctx, &host, &entry_for(&server_b, "entry-b"))
        .await
        .unwrap();

    let created = Arc::new(Mutex::new(Vec::new()));
    let dashboards = RecordingDashboards {
        created: created.clone(),
    };

    let actions = ActionRegistry::new();
    register_dashboard_action(&actions, ctx.clone(), dashboards);
    assert!(actions.contains(DOMAIN, DASHBOARD_ACTION));

    actions.invoke(DOMAIN, DASHBOARD_ACTION).await.unwrap();

    let mut dashboards = created.lock().unwrap().clone();
    dashboards.sort_by(|a, b| a.title.cmp(&b.title));

    assert_eq!(dashboards.len(), 2);
    assert_eq!(dashboards[0].title, "Energy (entry-a)");
    assert_eq!(dashboards[1].title, "Energy (entry-b)");
    for dashboard in &dashboards {
        assert_eq!(dashboard.url_path, "url_path");
        assert_eq!(dashboard.views.len(), 1);
        assert_eq!(dashboard.views[0].badges[0].entity, FIXED_BADGE_ENTITY);
    }
}

#[tokio::test]
async fn invoking_unregistered_action_fails() {
    let actions = ActionRegistry::new();
    let err = actions.invoke(DOMAIN, "no_such_action").await.unwrap_err();
    assert!(err.to_string().contains("no_such_action"));
}
