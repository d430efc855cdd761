use crate::aggregate;
use crate::config::ScanConfig;
use crate::detect::{
    brand::BrandScanner, catalog::ALL_BRANDS, description::DescriptionFetcher, ssdp::SsdpProbe,
    DiscoveryStrategy,
};
use crate::errors::DiscoveryError;
use crate::model::{DetectionSet, DeviceRecord, RawDetection, ResolvedDevice};
use crate::net::probe::http_client;
use crate::net::subnet::Subnet;
use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

/// Discovery engine that runs every strategy concurrently and merges the
/// results into one device per address
pub struct TvDiscovery {
    config: ScanConfig,
    /// `None` follows the local address, resolved again on every run
    pinned_subnet: Option<Subnet>,
    strategies: Vec<Arc<dyn DiscoveryStrategy>>,
}

impl TvDiscovery {
    /// Scan the /24 of this host's outward-facing address, as it is at the
    /// time of each run
    pub fn new(config: ScanConfig) -> Result<Self, DiscoveryError> {
        let strategies = default_strategies(&config)?;
        Ok(Self::with_local_subnet(config, strategies))
    }

    /// Create an engine with SSDP and all brand scanners for a given /24
    pub fn for_subnet(config: ScanConfig, subnet: Subnet) -> Result<Self, DiscoveryError> {
        let strategies = default_strategies(&config)?;
        Ok(Self::with_strategies(config, subnet, strategies))
    }

    pub fn with_strategies(
        config: ScanConfig,
        subnet: Subnet,
        strategies: Vec<Arc<dyn DiscoveryStrategy>>,
    ) -> Self {
        Self {
            config,
            pinned_subnet: Some(subnet),
            strategies,
        }
    }

    /// Custom strategies over the local /24, re-resolved on every run
    pub fn with_local_subnet(
        config: ScanConfig,
        strategies: Vec<Arc<dyn DiscoveryStrategy>>,
    ) -> Self {
        Self {
            config,
            pinned_subnet: None,
            strategies,
        }
    }

    /// The /24 the next run will scan
    pub fn subnet(&self) -> Subnet {
        self.pinned_subnet.unwrap_or_else(Subnet::local)
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }

    /// Run every strategy and return the raw detections in append order.
    ///
    /// Strategies share one deadline measured from the start of the run.
    /// A strategy still running at the deadline is detached, not aborted;
    /// what it recorded up to then is kept.
    pub async fn collect(&self) -> Vec<RawDetection> {
        self.run(self.subnet()).await
    }

    /// One device per address inside the scanned /24
    pub async fn discover_devices(&self) -> Vec<ResolvedDevice> {
        let subnet = self.subnet();
        let in_range: Vec<RawDetection> = self
            .run(subnet)
            .await
            .into_iter()
            .filter(|detection| {
                let inside = subnet.contains(detection.address);
                if !inside {
                    debug!(
                        address = %detection.address,
                        %subnet,
                        "dropping detection outside subnet"
                    );
                }
                inside
            })
            .collect();
        aggregate::resolve(&in_range)
    }

    /// `"<name> (<address>)"` to address for every device found
    pub async fn discover(&self) -> BTreeMap<String, Ipv4Addr> {
        aggregate::label_map(&self.discover_devices().await)
    }

    /// Address to name, method and descriptor location. Runs a fresh discovery.
    pub async fn discover_detailed(&self) -> BTreeMap<Ipv4Addr, DeviceRecord> {
        aggregate::detailed_map(&self.discover_devices().await)
    }

    async fn run(&self, subnet: Subnet) -> Vec<RawDetection> {
        let detections = DetectionSet::new();
        let hosts: Arc<[Ipv4Addr]> = subnet.hosts(self.config.host_range).into();
        let deadline = Instant::now() + self.config.join_timeout();

        info!(
            %subnet,
            hosts = hosts.len(),
            strategies = self.strategies.len(),
            "starting smart TV discovery"
        );

        let handles: Vec<_> = self
            .strategies
            .iter()
            .map(|strategy| {
                let strategy = Arc::clone(strategy);
                let hosts = Arc::clone(&hosts);
                let detections = detections.clone();
                let name = strategy.name();
                let handle = tokio::spawn(async move {
                    strategy.discover(&hosts, &detections).await;
                });
                (name, handle)
            })
            .collect();

        for (name, handle) in handles {
            match timeout_at(deadline, handle).await {
                Ok(Ok(())) => debug!(strategy = name, "strategy finished"),
                Ok(Err(e)) => warn!(strategy = name, error = %e, "strategy task failed"),
                Err(_) => warn!(
                    strategy = name,
                    "strategy missed the join deadline, keeping partial results"
                ),
            }
        }

        let snapshot = detections.snapshot();
        info!(detections = snapshot.len(), "discovery run complete");
        snapshot
    }
}

/// SSDP plus one scanner per brand, sharing one HTTP client
fn default_strategies(
    config: &ScanConfig,
) -> Result<Vec<Arc<dyn DiscoveryStrategy>>, DiscoveryError> {
    config.validate()?;
    let client = http_client(config.request_timeout())?;
    let fetcher = Arc::new(DescriptionFetcher::new(client.clone()));

    let mut strategies: Vec<Arc<dyn DiscoveryStrategy>> =
        vec![Arc::new(SsdpProbe::new(fetcher, config.discovery_timeout()))];
    for profile in ALL_BRANDS {
        strategies.push(Arc::new(BrandScanner::new(profile, client.clone(), config)));
    }
    Ok(strategies)
}
