//! Unit tests for the mirror status client

use super::*;

use crate::transport::mock::RecordingTransport;
use crate::transport::HttpTransport;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mirror(url: &str, country_code: &str, active: bool) -> serde_json::Value {
    json!({
        "url": url,
        "protocol": url.split(':').next().unwrap(),
        "last_sync": "2024-05-01T10:00:00Z",
        "completion_pct": 0.98,
        "delay": 1200,
        "duration_avg": 0.5,
        "duration_stddev": 0.1,
        "score": 1.25,
        "active": active,
        "country": "",
        "country_code": country_code,
        "isos": true,
        "ipv4": true,
        "ipv6": false,
        "details": format!("{} details", url)
    })
}

fn feed(mirrors: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "cutoff": 86400,
        "last_check": "2024-05-01T10:30:00Z",
        "num_checks": 24,
        "check_frequency": 3600,
        "urls": mirrors,
        "version": 3
    })
}

#[test]
fn test_mirror_client_creation() {
    let client = MirrorClient::new(Arc::new(HttpTransport::new().unwrap()));
    assert_eq!(
        client.feed_url().as_str(),
        "https://archlinux.org/mirrors/status/json/"
    );
}

#[tokio::test]
async fn test_list_mirrors_keeps_order_and_fields() {
    let urls = [
        "https://z.example.org/arch/",
        "http://a.example.org/arch/",
        "rsync://m.example.org/arch/",
    ];
    let transport = Arc::new(RecordingTransport::respond_json(feed(vec![
        mirror(urls[0], "SE", true),
        mirror(urls[1], "US", false),
        mirror(urls[2], "JP", true),
    ])));
    let client = MirrorClient::new(transport.clone());

    let list = client.list_mirrors().await.unwrap();
    assert_eq!(list.urls.len(), 3);
    let got: Vec<&str> = list.urls.iter().map(|m| m.url.as_str()).collect();
    assert_eq!(got, urls);

    let second = &list.urls[1];
    assert_eq!(second.protocol, "http");
    assert_eq!(second.country_code, "US");
    assert!(!second.active);
    assert_eq!(second.completion_pct, Some(0.98));
    assert_eq!(second.delay, Some(1200));
    assert_eq!(second.score, Some(1.25));
    assert!(second.isos && second.ipv4 && !second.ipv6);
    assert_eq!(second.details, "http://a.example.org/arch/ details");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query(), None);
}

#[tokio::test]
async fn test_list_mirrors_empty_feed() {
    let transport = Arc::new(RecordingTransport::respond_json(feed(vec![])));
    let client = MirrorClient::new(transport);

    let list = client.list_mirrors().await.unwrap();
    assert!(list.urls.is_empty());
    assert_eq!(list.check_frequency, 3600);
}

#[tokio::test]
async fn test_list_mirrors_malformed_body() {
    let transport = Arc::new(RecordingTransport::respond(200, r#"{"cutoff": 86400, "urls": ["#));
    let client = MirrorClient::new(transport);

    let err = client.list_mirrors().await.unwrap_err();
    match err {
        ArchApiError::Decode { operation, stage, .. } => {
            assert_eq!(operation, Operation::ListMirrors);
            assert_eq!(stage, DecodeStage::MirrorList);
        }
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_mirrors_error_status() {
    let transport = Arc::new(RecordingTransport::respond(404, "not found"));
    let client = MirrorClient::new(transport);

    let err = client.list_mirrors().await.unwrap_err();
    match err {
        ArchApiError::Transport { operation, source } => {
            assert_eq!(operation, Operation::ListMirrors);
            assert_eq!(source.http_status(), Some(404));
        }
        other => panic!("Expected Transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_mirrors_transport_failure() {
    let transport = Arc::new(RecordingTransport::fail("dns lookup failed"));
    let client = MirrorClient::new(transport);

    let err = client.list_mirrors().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "archapi: mirror list request failed: dns lookup failed"
    );
}

#[tokio::test]
async fn test_list_mirrors_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mirrors/status/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed(vec![mirror(
            "https://mirror.example.net/archlinux/",
            "NL",
            true,
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let feed_url = Url::parse(&format!("{}/mirrors/status/json/", mock_server.uri())).unwrap();
    let client = MirrorClient::new(Arc::new(HttpTransport::new().unwrap())).with_feed_url(feed_url);

    let list = client.list_mirrors().await.unwrap();
    assert_eq!(list.urls.len(), 1);
    assert_eq!(list.urls[0].country_code, "NL");
    assert!(list.urls[0].in_country("nl"));
}

#[test]
fn test_decode_mirror_list_rejects_wrong_shape() {
    let err = decode_mirror_list(br#"{"version":5,"type":"search","results":[]}"#).unwrap_err();
    assert!(matches!(err, ArchApiError::Decode { .. }));
}
