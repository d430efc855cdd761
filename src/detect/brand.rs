use super::catalog::{BrandProfile, Probe};
use super::DiscoveryStrategy;
use crate::config::ScanConfig;
use crate::model::{DetectionSet, RawDetection};
use crate::net::probe::{http_get, tcp_port_open};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing::debug;

const CAST_FALLBACK_NAME: &str = "Chromecast";
const CAST_SETUP_PATHS: &[&str] = &["/setup/offer", "/setup/scan_wifi"];

/// Runs one brand's probe table against every host of the subnet
pub struct BrandScanner {
    profile: &'static BrandProfile,
    client: reqwest::Client,
    connect_timeout: Duration,
    max_concurrent_probes: usize,
}

impl BrandScanner {
    pub fn new(
        profile: &'static BrandProfile,
        client: reqwest::Client,
        config: &ScanConfig,
    ) -> Self {
        Self {
            profile,
            client,
            connect_timeout: config.request_timeout(),
            max_concurrent_probes: config.max_concurrent_probes.max(1),
        }
    }

    /// Probe one host; the first probe with a signal wins
    pub async fn probe_host(&self, ip: Ipv4Addr) -> Option<RawDetection> {
        for probe in self.profile.probes {
            if let Some(detection) = self.run_probe(ip, probe).await {
                return Some(detection);
            }
        }
        None
    }

    async fn run_probe(&self, ip: Ipv4Addr, probe: &Probe) -> Option<RawDetection> {
        match *probe {
            Probe::TcpOpen { port, name, method } => tcp_port_open(ip, port, self.connect_timeout)
                .await
                .then(|| RawDetection::new(ip, name, method.render(port))),
            Probe::HttpBody {
                port,
                path,
                keywords,
                require_ok,
                naming,
                method,
            } => {
                let reply = http_get(&self.client, &probe_url(ip, port, path)).await?;
                if require_ok && !reply.is_ok() {
                    return None;
                }
                let body = reply.body.to_lowercase();
                keywords
                    .iter()
                    .any(|keyword| body.contains(keyword))
                    .then(|| RawDetection::new(ip, naming.resolve(&body), method.render(port)))
            }
            Probe::CastInfo { port } => self.cast_info(ip, port).await,
        }
    }

    /// eureka_info names the device; the other setup endpoints only prove
    /// it is a Cast target. An unreachable port skips straight to the next.
    async fn cast_info(&self, ip: Ipv4Addr, port: u16) -> Option<RawDetection> {
        let eureka = http_get(&self.client, &probe_url(ip, port, "/setup/eureka_info")).await?;
        if eureka.is_ok() {
            if let Ok(Value::Object(info)) = serde_json::from_str::<Value>(&eureka.body) {
                let name = info
                    .get("name")
                    .and_then(Value::as_str)
                    .filter(|name| !name.is_empty())
                    .unwrap_or(CAST_FALLBACK_NAME);
                return Some(RawDetection::new(ip, name, "Eureka"));
            }
        }

        for path in CAST_SETUP_PATHS {
            if let Some(reply) = http_get(&self.client, &probe_url(ip, port, path)).await {
                if reply.is_ok() {
                    let method = format!("Cast_{}", port);
                    return Some(RawDetection::new(ip, CAST_FALLBACK_NAME, method));
                }
            }
        }
        None
    }
}

fn probe_url(ip: Ipv4Addr, port: u16, path: &str) -> String {
    format!("http://{}:{}{}", ip, port, path)
}

#[async_trait]
impl DiscoveryStrategy for BrandScanner {
    fn name(&self) -> &'static str {
        self.profile.brand
    }

    async fn discover(&self, hosts: &[Ipv4Addr], detections: &DetectionSet) {
        let mut probes = stream::iter(hosts.iter().copied())
            .map(|ip| self.probe_host(ip))
            .buffer_unordered(self.max_concurrent_probes);

        while let Some(found) = probes.next().await {
            if let Some(detection) = found {
                debug!(
                    brand = self.profile.brand,
                    address = %detection.address,
                    method = %detection.method,
                    "brand probe matched"
                );
                detections.push(detection);
            }
        }
    }
}
