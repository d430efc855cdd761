use super::description::DescriptionFetcher;
use super::DiscoveryStrategy;
use crate::constants::{SSDP_MULTICAST_ADDR, SSDP_MX, SSDP_SEARCH_TARGETS};
use crate::model::{DetectionSet, RawDetection};
use async_trait::async_trait;
use futures::future::join_all;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, trace};

/// Headers of an SSDP reply that carries a descriptor location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsdpReply {
    pub location: String,
    pub server: Option<String>,
}

/// Extract LOCATION and SERVER from a reply. Replies without a LOCATION
/// header are not device announcements and yield `None`.
pub fn parse_ssdp_reply(text: &str) -> Option<SsdpReply> {
    let mut location = None;
    let mut server = None;

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if key.eq_ignore_ascii_case("LOCATION") {
            location = Some(value.to_string());
        } else if key.eq_ignore_ascii_case("SERVER") {
            server = Some(value.to_string());
        }
    }

    location
        .filter(|location| !location.is_empty())
        .map(|location| SsdpReply { location, server })
}

/// M-SEARCH datagram for one search target
pub fn search_request(search_target: &str) -> String {
    format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: {}\r\n\
         MAN: \"ssdp:discover\"\r\n\
         ST: {}\r\n\
         MX: {}\r\n\r\n",
        SSDP_MULTICAST_ADDR, search_target, SSDP_MX
    )
}

/// Multicast discovery over SSDP, one query per search target
pub struct SsdpProbe {
    fetcher: Arc<DescriptionFetcher>,
    listen_window: Duration,
    destination: SocketAddr,
}

impl SsdpProbe {
    pub fn new(fetcher: Arc<DescriptionFetcher>, listen_window: Duration) -> Self {
        let destination = SSDP_MULTICAST_ADDR
            .parse()
            .unwrap_or_else(|_| SocketAddr::from((Ipv4Addr::new(239, 255, 255, 250), 1900)));
        Self {
            fetcher,
            listen_window,
            destination,
        }
    }

    /// Send queries somewhere other than the multicast group
    pub fn with_destination(mut self, destination: SocketAddr) -> Self {
        self.destination = destination;
        self
    }

    async fn query(&self, search_target: &str, detections: &DetectionSet) {
        if let Err(e) = self.search(search_target, detections).await {
            debug!(search_target, error = %e, "SSDP query aborted");
        }
    }

    async fn search(&self, search_target: &str, detections: &DetectionSet) -> std::io::Result<()> {
        let socket = UdpSocket::bind(("0.0.0.0", 0)).await?;
        socket
            .send_to(search_request(search_target).as_bytes(), self.destination)
            .await?;

        let deadline = Instant::now() + self.listen_window;
        let mut buf = vec![0u8; 2048];

        loop {
            let (len, from) = match timeout_at(deadline, socket.recv_from(&mut buf)).await {
                Ok(received) => received?,
                Err(_) => break,
            };
            let IpAddr::V4(address) = from.ip() else {
                continue;
            };
            let text = String::from_utf8_lossy(&buf[..len]);
            let Some(reply) = parse_ssdp_reply(&text) else {
                trace!(%from, "ignoring SSDP datagram without LOCATION");
                continue;
            };

            let name = self
                .fetcher
                .fetch_name(&reply.location, reply.server.as_deref())
                .await;
            debug!(%address, %name, location = %reply.location, "SSDP reply");
            detections.push(RawDetection::new(address, name, "SSDP").with_location(reply.location));
        }
        Ok(())
    }
}

#[async_trait]
impl DiscoveryStrategy for SsdpProbe {
    fn name(&self) -> &'static str {
        "SSDP"
    }

    async fn discover(&self, _hosts: &[Ipv4Addr], detections: &DetectionSet) {
        let queries = SSDP_SEARCH_TARGETS
            .iter()
            .map(|search_target| self.query(search_target, detections));
        join_all(queries).await;
    }
}
