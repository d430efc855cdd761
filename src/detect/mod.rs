use crate::model::DetectionSet;
use async_trait::async_trait;
use std::net::Ipv4Addr;

// Submodule declarations
pub mod brand;
pub mod catalog;
pub mod description;
pub mod ssdp;

/// Discovery strategy trait
///
/// Each strategy implements one way of finding TVs on the local network
/// (SSDP search, or a brand-specific port and HTTP heuristic). Strategies
/// append what they find to the shared set as they go, so a strategy cut off
/// by the run deadline still contributes everything recorded before it.
#[async_trait]
pub trait DiscoveryStrategy: Send + Sync {
    /// Probe the given hosts and record every positive signal
    async fn discover(&self, hosts: &[Ipv4Addr], detections: &DetectionSet);

    /// Return a human-readable name for this strategy
    fn name(&self) -> &'static str;
}
