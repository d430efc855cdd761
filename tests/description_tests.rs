use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::net::Ipv4Addr;
use test_utils::{serve_fake_device, test_client};
use tvscout::detect::description::{name_from_body, DescriptionFetcher};


const LIVING_ROOM_XML: &str = r#"<root xmlns="urn:schemas-upnp-org:device-1-0"><device><friendlyName>Living Room TV</friendlyName></device></root>"#;

#[test]
fn test_friendly_name_from_namespaced_descriptor() {
    assert_eq!(name_from_body(LIVING_ROOM_XML, None), "Living Room TV");
}

#[test]
fn test_friendly_name_from_unnamespaced_descriptor() {
    let body = "<?xml version=\"1.0\"?>\n<root><device>\n  <friendlyName>  Kitchen TV  </friendlyName>\n</device></root>";
    assert_eq!(name_from_body(body, None), "Kitchen TV");
}

#[test]
fn test_friendly_name_from_malformed_descriptor() {
    let body = "<root><device><friendlyName>Bedroom TV</friendlyName><unclosed></device>";
    assert_eq!(name_from_body(body, None), "Bedroom TV");
}

#[test]
fn test_server_header_fallbacks() {
    let body = "<root><device><modelName>X</modelName></device></root>";
    assert_eq!(name_from_body(body, Some("Android/9 UPnP/1.0")), "Android TV");
    assert_eq!(
        name_from_body(body, Some("Linux/3.10 UPnP/1.0 Sony-BDP/2.0")),
        "Smart TV (Linux)"
    );
    assert_eq!(name_from_body(body, Some("Microsoft-Windows/10.0")), "Unknown Smart TV");
    assert_eq!(name_from_body("not xml at all", None), "Unknown Smart TV");
}

#[tokio::test]
async fn test_fetch_name_over_http() {
    let router = Router::new().route("/description.xml", get(|| async { LIVING_ROOM_XML }));
    let addr = serve_fake_device(Ipv4Addr::LOCALHOST, 0, router).await;

    let fetcher = DescriptionFetcher::new(test_client());
    let name = fetcher
        .fetch_name(&format!("http://{}/description.xml", addr), None)
        .await;
    assert_eq!(name, "Living Room TV");
}

#[tokio::test]
async fn test_fetch_name_non_200_uses_server_header() {
    let router = Router::new().route(
        "/description.xml",
        get(|| async { (StatusCode::NOT_FOUND, LIVING_ROOM_XML) }),
    );
    let addr = serve_fake_device(Ipv4Addr::LOCALHOST, 0, router).await;

    let fetcher = DescriptionFetcher::new(test_client());
    let url = format!("http://{}/description.xml", addr);
    assert_eq!(fetcher.fetch_name(&url, Some("Android/12")).await, "Android TV");
    assert_eq!(fetcher.fetch_name(&url, None).await, "Unknown Smart TV");
}

#[tokio::test]
async fn test_fetch_name_unreachable_is_generic() {
    let fetcher = DescriptionFetcher::new(test_client());
    let name = fetcher
        .fetch_name("http://127.0.0.84:9/description.xml", None)
        .await;
    assert_eq!(name, "Unknown Smart TV");
}
