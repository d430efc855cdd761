use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::net::Ipv4Addr;
use test_utils::{fast_config, open_silent_port, serve_fake_device, test_client};
use tvscout::detect::brand::BrandScanner;
use tvscout::detect::catalog::{ALL_BRANDS, ANDROID_TV, CHROMECAST, FIRE_TV, ROKU, SAMSUNG};
use tvscout::{DetectionSet, DiscoveryStrategy};


// Each test owns its own loopback alias so fake devices never collide.

fn scanner(profile: &'static tvscout::detect::catalog::BrandProfile) -> BrandScanner {
    BrandScanner::new(profile, test_client(), &fast_config())
}

#[tokio::test]
async fn test_open_debug_port_is_android_tv() {
    let ip = Ipv4Addr::new(127, 0, 0, 51);
    let _listener = open_silent_port(ip, 6467).await;

    let detection = scanner(&ANDROID_TV).probe_host(ip).await.unwrap();
    assert_eq!(detection.address, ip);
    assert_eq!(detection.method, "ADB_PORT");
    assert_eq!(detection.display_name, "Android TV / Google TV");
    assert_eq!(detection.descriptor_location, None);
}

#[tokio::test]
async fn test_debug_port_alone_is_not_another_brand() {
    let ip = Ipv4Addr::new(127, 0, 0, 52);
    let _listener = open_silent_port(ip, 6467).await;

    assert!(scanner(&FIRE_TV).probe_host(ip).await.is_none());
    assert!(scanner(&SAMSUNG).probe_host(ip).await.is_none());
    assert!(scanner(&CHROMECAST).probe_host(ip).await.is_none());
}

#[tokio::test]
async fn test_eureka_info_names_chromecast() {
    let ip = Ipv4Addr::new(127, 0, 0, 53);
    let router = Router::new().route(
        "/setup/eureka_info",
        get(|| async { r#"{"name":"Den Chromecast","version":12}"# }),
    );
    serve_fake_device(ip, 8008, router).await;

    let detection = scanner(&CHROMECAST).probe_host(ip).await.unwrap();
    assert_eq!(detection.method, "Eureka");
    assert_eq!(detection.display_name, "Den Chromecast");
}

#[tokio::test]
async fn test_cast_setup_endpoint_without_eureka() {
    let ip = Ipv4Addr::new(127, 0, 0, 54);
    let router = Router::new()
        .route("/setup/eureka_info", get(|| async { StatusCode::NOT_FOUND }))
        .route("/setup/offer", get(|| async { "ok" }));
    serve_fake_device(ip, 8008, router).await;

    let detection = scanner(&CHROMECAST).probe_host(ip).await.unwrap();
    assert_eq!(detection.method, "Cast_8008");
    assert_eq!(detection.display_name, "Chromecast");
}

#[tokio::test]
async fn test_eureka_without_name_falls_back() {
    let ip = Ipv4Addr::new(127, 0, 0, 55);
    let router = Router::new().route("/setup/eureka_info", get(|| async { r#"{"name":""}"# }));
    serve_fake_device(ip, 8008, router).await;

    let detection = scanner(&CHROMECAST).probe_host(ip).await.unwrap();
    assert_eq!(detection.method, "Eureka");
    assert_eq!(detection.display_name, "Chromecast");
}

#[tokio::test]
async fn test_android_http_body_refines_name() {
    let ip = Ipv4Addr::new(127, 0, 0, 56);
    let router = Router::new().route("/", get(|| async { "<html>Chromecast built-in</html>" }));
    serve_fake_device(ip, 8008, router).await;

    let detection = scanner(&ANDROID_TV).probe_host(ip).await.unwrap();
    assert_eq!(detection.method, "HTTP_8008");
    assert_eq!(detection.display_name, "Chromecast / Google TV");
}

#[tokio::test]
async fn test_roku_root_page() {
    let ip = Ipv4Addr::new(127, 0, 0, 57);
    let router = Router::new().route(
        "/",
        get(|| async { "<root><device>Roku Ultra</device></root>" }),
    );
    serve_fake_device(ip, 8060, router).await;

    let detection = scanner(&ROKU).probe_host(ip).await.unwrap();
    assert_eq!(detection.method, "ECP");
    assert_eq!(detection.display_name, "Roku TV");
}

#[tokio::test]
async fn test_roku_device_info_endpoint() {
    let ip = Ipv4Addr::new(127, 0, 0, 58);
    let router = Router::new()
        .route("/", get(|| async { "hello" }))
        .route(
            "/query/device-info",
            get(|| async { "<device-info><vendor-name>Roku</vendor-name></device-info>" }),
        );
    serve_fake_device(ip, 8060, router).await;

    let detection = scanner(&ROKU).probe_host(ip).await.unwrap();
    assert_eq!(detection.method, "DeviceInfo");
}

#[tokio::test]
async fn test_samsung_requires_ok_status() {
    let ip = Ipv4Addr::new(127, 0, 0, 59);
    let router = Router::new().route(
        "/",
        get(|| async { (StatusCode::FORBIDDEN, "Samsung Tizen") }),
    );
    serve_fake_device(ip, 8080, router).await;

    assert!(scanner(&SAMSUNG).probe_host(ip).await.is_none());
}

#[tokio::test]
async fn test_silent_host_matches_no_brand() {
    let ip = Ipv4Addr::new(127, 0, 0, 60);
    for profile in ALL_BRANDS {
        let found = BrandScanner::new(profile, test_client(), &fast_config())
            .probe_host(ip)
            .await;
        assert!(found.is_none(), "{} matched a silent host", profile.brand);
    }
}

#[tokio::test]
async fn test_scanner_records_only_responding_hosts() {
    let hit = Ipv4Addr::new(127, 0, 0, 61);
    let _listener = open_silent_port(hit, 6467).await;
    let hosts: Vec<Ipv4Addr> = (61..=70).map(|d| Ipv4Addr::new(127, 0, 0, d)).collect();

    let detections = DetectionSet::new();
    let scanner = scanner(&ANDROID_TV);
    assert_eq!(scanner.name(), "Android TV");
    scanner.discover(&hosts, &detections).await;

    let found = detections.snapshot();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].address, hit);
    assert_eq!(found[0].method, "ADB_PORT");
}
