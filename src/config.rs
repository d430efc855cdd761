use crate::errors::DiscoveryError;
use std::time::Duration;

/// Configuration settings for a discovery run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Timeout in milliseconds for TCP connects and HTTP requests
    pub request_timeout_ms: u64,

    /// How long each SSDP query listens for replies
    pub discovery_timeout_ms: u64,

    /// Deadline for every strategy, measured from run start
    pub join_timeout_ms: u64,

    /// Maximum number of hosts probed at once by a single brand scanner
    pub max_concurrent_probes: usize,

    /// Inclusive range of host octets scanned within the /24
    pub host_range: (u8, u8),
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 1000,
            discovery_timeout_ms: 5000,
            join_timeout_ms: 20_000,
            max_concurrent_probes: 50,
            host_range: (1, 254),
        }
    }
}

impl ScanConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }

    pub fn join_timeout(&self) -> Duration {
        Duration::from_millis(self.join_timeout_ms)
    }

    /// Set the maximum number of concurrent probes per scanner
    pub fn set_concurrency(&mut self, jobs: usize) {
        self.max_concurrent_probes = jobs.max(1);
    }

    /// Reject settings that would make a run hang or scan nothing
    pub fn validate(&self) -> Result<(), DiscoveryError> {
        if self.max_concurrent_probes == 0 {
            return Err(DiscoveryError::InvalidConfig(
                "max_concurrent_probes must be at least 1".to_string(),
            ));
        }
        let (first, last) = self.host_range;
        if first == 0 || first > last {
            return Err(DiscoveryError::InvalidConfig(format!(
                "host range {}-{} is empty or includes the network address",
                first, last
            )));
        }
        if self.request_timeout_ms == 0
            || self.discovery_timeout_ms == 0
            || self.join_timeout_ms == 0
        {
            return Err(DiscoveryError::InvalidConfig(
                "timeouts must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
