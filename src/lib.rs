//! tvscout - smart TV discovery for the local network
//!
//! This library locates TVs and streaming devices on the local /24 using:
//! - SSDP multicast search with UPnP descriptor name lookup
//! - Brand-specific port and HTTP heuristics (Android TV, Samsung, LG,
//!   Chromecast, Roku, Apple TV, Fire TV)
//! - Per-address reconciliation of conflicting detections

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod detect;
pub mod engine;
pub mod errors;
pub mod model;
pub mod net;
pub mod table;

// Re-export commonly used types for convenience
pub use config::ScanConfig;
pub use detect::brand::BrandScanner;
pub use detect::description::DescriptionFetcher;
pub use detect::ssdp::SsdpProbe;
pub use detect::DiscoveryStrategy;
pub use engine::TvDiscovery;
pub use errors::DiscoveryError;
pub use model::{DetectionSet, DeviceRecord, RawDetection, ResolvedDevice};
pub use net::subnet::{local_ipv4, Subnet};
