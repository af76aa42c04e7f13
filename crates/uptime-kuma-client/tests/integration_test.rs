//! Integration tests for the Uptime Kuma client
//!
//! The HTTP contract is exercised against a wiremock server. The `#[ignore]`d
//! test at the bottom needs a running uptime-kuma-api instance:
//! set UPTIME_KUMA_URL, UPTIME_KUMA_USERNAME and UPTIME_KUMA_PASSWORD to run it.

use serde_json::json;
use std::time::Duration;
use uptime_kuma_client::{
    ClientConfig, DesiredMonitor, DesiredTag, UptimeKumaClient, UptimeKumaClientTrait,
    UptimeKumaError,
};
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login/access-token/"))
        .and(body_string_contains("username=admin"))
        .and(body_string_contains("password=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TOKEN,
            "token_type": "bearer",
        })))
        .mount(server)
        .await;
}

async fn login(server: &MockServer) -> UptimeKumaClient {
    mount_login(server).await;
    UptimeKumaClient::authenticate(ClientConfig::new(server.uri(), "admin", "secret"))
        .await
        .expect("login against mock server")
}

fn monitor_json(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "url": format!("https://{}.example.com", name),
        "interval": 60,
        "type": "http",
        "tags": [format!("k8s-{}", name)],
    })
}

fn desired(name: &str) -> DesiredMonitor {
    DesiredMonitor {
        name: name.to_string(),
        url: format!("https://{}.example.com", name),
        interval: 60,
        tags: vec![format!("k8s-{}", name)],
    }
}

#[tokio::test]
async fn test_authenticate_and_list_with_bearer_token() {
    let server = MockServer::start().await;
    let client = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/monitors"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "monitors": [monitor_json(1, "shop"), monitor_json(2, "blog")],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let monitors = client.list_monitors().await.unwrap();
    assert_eq!(monitors.len(), 2);
    assert_eq!(monitors[1].name, "blog");
    assert_eq!(client.token_type(), "bearer");
}

#[tokio::test]
async fn test_authenticate_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/access-token/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect username or password"))
        .mount(&server)
        .await;

    let err = UptimeKumaClient::authenticate(ClientConfig::new(server.uri(), "admin", "wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, UptimeKumaError::Authentication(_)));
}

#[tokio::test]
async fn test_authenticate_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/access-token/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = UptimeKumaClient::authenticate(ClientConfig::new(server.uri(), "admin", "secret"))
        .await
        .unwrap_err();
    assert!(matches!(err, UptimeKumaError::Authentication(_)));
}

#[tokio::test]
async fn test_create_existing_monitor_does_not_post() {
    let server = MockServer::start().await;
    let client = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/monitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "monitors": [monitor_json(5, "shop")],
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/monitors"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.create_monitor(&desired("shop")).await.unwrap_err();
    assert!(err.is_already_exists());
}

#[tokio::test]
async fn test_create_monitor_posts_http_monitor_with_tags() {
    let server = MockServer::start().await;
    let client = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/monitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "monitors": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/monitors"))
        .and(body_json(json!({
            "type": "http",
            "name": "shop",
            "url": "https://shop.example.com",
            "interval": 60,
            "tags": ["k8s-shop"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Added Successfully.",
            "monitorID": 9,
        })))
        .expect(1)
        .mount(&server)
        .await;

    // An acknowledgement instead of the stored monitor falls back to the request
    let created = client.create_monitor(&desired("shop")).await.unwrap();
    assert_eq!(created.name, "shop");
    assert_eq!(created.url, "https://shop.example.com");
}

#[tokio::test]
async fn test_update_monitor_patches_by_id() {
    let server = MockServer::start().await;
    let client = login(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/monitors/5"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(monitor_json(5, "shop")))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client.update_monitor(5, &desired("shop")).await.unwrap();
    assert_eq!(updated.id, 5);
}

#[tokio::test]
async fn test_delete_missing_monitor_is_ok() {
    let server = MockServer::start().await;
    let client = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/monitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "monitors": [monitor_json(1, "other")],
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    client.delete_monitor("shop").await.unwrap();
}

#[tokio::test]
async fn test_delete_monitor_removes_duplicates() {
    let server = MockServer::start().await;
    let client = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/monitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "monitors": [monitor_json(3, "dup"), monitor_json(4, "keep"), monitor_json(8, "dup")],
        })))
        .mount(&server)
        .await;
    for id in [3, 8] {
        Mock::given(method("DELETE"))
            .and(path(format!("/monitors/{}", id)))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    client.delete_monitor("dup").await.unwrap();
}

#[tokio::test]
async fn test_delete_tag_sends_tag_id_body() {
    let server = MockServer::start().await;
    let client = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tags": [{"id": 12, "name": "k8s-default", "color": "black"}],
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tags/12"))
        .and(body_json(json!({ "tag_id": 12 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_tag("k8s-default").await.unwrap();
}

#[tokio::test]
async fn test_create_existing_tag_returns_it() {
    let server = MockServer::start().await;
    let client = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tags": [{"id": 12, "name": "k8s-default", "color": "black"}],
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tags"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let tag = client
        .create_tag(&DesiredTag {
            name: "k8s-default".to_string(),
            color: "black".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(tag.id, 12);
}

#[tokio::test]
async fn test_insert_monitor_posts_without_listing() {
    let server = MockServer::start().await;
    let client = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/monitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "monitors": [] })))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/monitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(monitor_json(3, "shop")))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.insert_monitor(&desired("shop")).await.unwrap();
    assert_eq!(created.id, 3);
}

#[tokio::test]
async fn test_conflict_is_already_exists() {
    let server = MockServer::start().await;
    let client = login(&server).await;

    Mock::given(method("POST"))
        .and(path("/tags"))
        .respond_with(ResponseTemplate::new(409).set_body_string("duplicate name"))
        .mount(&server)
        .await;

    let err = client
        .insert_tag(&DesiredTag {
            name: "k8s-default".to_string(),
            color: "black".to_string(),
        })
        .await
        .unwrap_err();
    assert!(err.is_already_exists());
}

#[tokio::test]
async fn test_authenticate_transport_failure_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/access-token/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": TOKEN, "token_type": "bearer" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri(), "admin", "secret")
        .with_timeout(Duration::from_millis(100));
    let err = UptimeKumaClient::authenticate(config).await.unwrap_err();
    assert!(matches!(err, UptimeKumaError::Http(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_non_200_is_api_error() {
    let server = MockServer::start().await;
    let client = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/tags"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.list_tags().await.unwrap_err();
    match err {
        UptimeKumaError::Api(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("boom"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
#[ignore] // Requires running uptime-kuma-api instance
async fn test_live_monitor_lifecycle() {
    let url = std::env::var("UPTIME_KUMA_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_string());
    let username = std::env::var("UPTIME_KUMA_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("UPTIME_KUMA_PASSWORD")
        .expect("UPTIME_KUMA_PASSWORD environment variable must be set");

    let client = UptimeKumaClient::authenticate(ClientConfig::new(url, username, password))
        .await
        .expect("Failed to authenticate");

    let monitor = desired("uptime-kuma-client-live-test");
    let _ = client.delete_monitor(&monitor.name).await;

    client.create_monitor(&monitor).await.expect("Failed to create monitor");
    let stored = client.get_monitor(&monitor.name).await.expect("Monitor not listed");
    assert_eq!(stored.url, monitor.url);

    client.delete_monitor(&monitor.name).await.expect("Failed to delete monitor");
    assert!(client.get_monitor(&monitor.name).await.unwrap_err().is_not_found());
}
