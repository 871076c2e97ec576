// Integration tests for device identification and feature control,
// using wiremock as the device.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lumabox_api::{ApiHost, Device, DeviceFamily, Error, Session};

const TIMEOUT: Duration = Duration::from_secs(5);

// ── Helpers ─────────────────────────────────────────────────────────

fn api_host_for(server: &MockServer, session: Session) -> ApiHost {
    let addr = server.address();
    ApiHost::new(addr.ip().to_string(), addr.port(), TIMEOUT, session)
}

fn anon_api_host(server: &MockServer) -> ApiHost {
    let session = Session::unauthenticated(TIMEOUT).unwrap();
    api_host_for(server, session)
}

fn info_body(device_type: &str, api_level: u32) -> serde_json::Value {
    json!({
        "device": {
            "deviceName": format!("My {device_type}"),
            "type": device_type,
            "id": "6334f7e3a871",
            "fv": "0.987",
            "hv": "4.3",
            "apiLevel": api_level,
            "product": device_type,
            "ip": "192.168.0.21"
        }
    })
}

async fn mount_info(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

// ── Identification ──────────────────────────────────────────────────

#[tokio::test]
async fn identify_switch_box() {
    let server = MockServer::start().await;
    mount_info(&server, info_body("switchBox", 20200229)).await;

    let device = Device::identify(anon_api_host(&server)).await.unwrap();

    assert_eq!(device.family(), DeviceFamily::SwitchBox);
    assert_eq!(device.name(), "My switchBox");
    assert_eq!(device.id().as_str(), "6334f7e3a871");
    assert_eq!(device.info().firmware_version.as_deref(), Some("0.987"));
    assert_eq!(device.capabilities().switches.len(), 1);
    assert_eq!(device.capabilities().feature_count(), 1);
}

#[tokio::test]
async fn identify_sends_basic_auth_when_credentials_present() {
    let server = MockServer::start().await;

    // "admin:pass" base64-encoded
    Mock::given(method("GET"))
        .and(path("/info"))
        .and(header("authorization", "Basic YWRtaW46cGFzcw=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(info_body("switchBox", 20200229)))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::maybe_authenticated(
        Some("admin"),
        Some(SecretString::from("pass".to_owned())),
        TIMEOUT,
    )
    .unwrap();
    assert!(session.is_authenticated());

    Device::identify(api_host_for(&server, session)).await.unwrap();
}

#[tokio::test]
async fn identify_maps_unauthorized_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = Device::identify(anon_api_host(&server)).await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }));
}

#[tokio::test]
async fn identify_rejects_unknown_device_type() {
    let server = MockServer::start().await;
    mount_info(&server, info_body("toasterBox", 20200229)).await;

    let err = Device::identify(anon_api_host(&server)).await.unwrap_err();
    assert!(err.is_unsupported());
    match err {
        Error::UnsupportedDevice { device_type } => assert_eq!(device_type, "toasterBox"),
        other => panic!("expected UnsupportedDevice, got {other:?}"),
    }
}

#[tokio::test]
async fn identify_rejects_stale_api_level() {
    let server = MockServer::start().await;
    mount_info(&server, info_body("shutterBox", 20150101)).await;

    let err = Device::identify(anon_api_host(&server)).await.unwrap_err();
    match err {
        Error::UnsupportedVersion {
            api_level,
            min_supported,
        } => {
            assert_eq!(api_level, 20150101);
            assert_eq!(min_supported, 20190911);
        }
        other => panic!("expected UnsupportedVersion, got {other:?}"),
    }
}

#[tokio::test]
async fn identify_treats_missing_api_level_as_zero() {
    let server = MockServer::start().await;
    let mut body = info_body("switchBox", 0);
    body["device"]
        .as_object_mut()
        .unwrap()
        .remove("apiLevel");
    mount_info(&server, body).await;

    let err = Device::identify(anon_api_host(&server)).await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedVersion { api_level: 0, .. }));
}

#[tokio::test]
async fn identify_reports_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = Device::identify(anon_api_host(&server)).await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

#[tokio::test]
async fn identify_multi_sensor_discovers_probes() {
    let server = MockServer::start().await;
    mount_info(&server, info_body("multiSensor", 20210413)).await;

    Mock::given(method("GET"))
        .and(path("/api/sensor/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sensors": [
                { "type": "temperature", "id": 0, "value": 2130 },
                { "type": "apparentPower", "id": 1, "value": 230 },
                { "type": "quantumFlux", "id": 2, "value": 1 }
            ]
        })))
        .mount(&server)
        .await;

    let device = Device::identify(anon_api_host(&server)).await.unwrap();

    // The unknown probe type is skipped, not an error.
    assert_eq!(device.capabilities().sensors.len(), 2);
    let classes: Vec<String> = device
        .capabilities()
        .sensors
        .iter()
        .map(|s| s.device_class().to_string())
        .collect();
    assert_eq!(classes, vec!["temperature", "apparentPower"]);
}

// ── Feature control ─────────────────────────────────────────────────

#[tokio::test]
async fn light_set_raw_hits_command_endpoint() {
    let server = MockServer::start().await;
    mount_info(&server, info_body("lightBox", 20200229)).await;

    Mock::given(method("GET"))
        .and(path("/s/light/ff00aa00"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let device = Device::identify(anon_api_host(&server)).await.unwrap();
    let light = &device.capabilities().lights[0];

    light.set_raw("ff00aa00").await.unwrap();
}

#[tokio::test]
async fn light_set_raw_validates_before_sending() {
    let server = MockServer::start().await;
    mount_info(&server, info_body("lightBox", 20200229)).await;

    let device = Device::identify(anon_api_host(&server)).await.unwrap();
    let light = &device.capabilities().lights[0];

    // No /s/ mock mounted: a BadValue proves nothing was sent.
    let err = light.set_raw("zz").await.unwrap_err();
    assert!(matches!(err, Error::BadValue { .. }));
}

#[tokio::test]
async fn switch_reads_relay_state() {
    let server = MockServer::start().await;
    mount_info(&server, info_body("switchBoxD", 20200229)).await;

    Mock::given(method("GET"))
        .and(path("/api/relay/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "relays": [
                { "relay": 0, "state": 0 },
                { "relay": 1, "state": 1 }
            ]
        })))
        .mount(&server)
        .await;

    let device = Device::identify(anon_api_host(&server)).await.unwrap();
    let switches = &device.capabilities().switches;

    assert_eq!(switches.len(), 2);
    assert!(!switches[0].is_on().await.unwrap());
    assert!(switches[1].is_on().await.unwrap());
}

#[tokio::test]
async fn sensor_read_scales_centi_values() {
    let server = MockServer::start().await;
    mount_info(&server, info_body("sensorBox", 20200229)).await;

    Mock::given(method("GET"))
        .and(path("/api/sensor/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sensors": [ { "type": "temperature", "id": 0, "value": 2130 } ]
        })))
        .mount(&server)
        .await;

    let device = Device::identify(anon_api_host(&server)).await.unwrap();
    let reading = device.capabilities().sensors[0].read().await.unwrap().unwrap();

    assert!((reading.value - 21.3).abs() < 1e-9);
    assert_eq!(reading.raw, 2130);
}
