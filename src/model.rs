use crate::constants::GENERIC_NAME_MARKER;
use serde::Serialize;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex, PoisonError};

/// A single observation made by one discovery strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDetection {
    pub address: Ipv4Addr,
    pub display_name: String,
    /// Which probe produced this, e.g. "SSDP", "ADB_PORT", "HTTP_8008"
    pub method: String,
    /// Descriptor URL, only known for SSDP replies
    pub descriptor_location: Option<String>,
}

impl RawDetection {
    pub fn new(
        address: Ipv4Addr,
        display_name: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            address,
            display_name: display_name.into(),
            method: method.into(),
            descriptor_location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.descriptor_location = Some(location.into());
        self
    }

    pub fn is_generic(&self) -> bool {
        self.display_name.contains(GENERIC_NAME_MARKER)
    }
}

/// Append-only collection shared by every strategy of one run.
///
/// Clones are handles to the same list. The lock is held only for the push,
/// never across network I/O.
#[derive(Debug, Clone, Default)]
pub struct DetectionSet {
    inner: Arc<Mutex<Vec<RawDetection>>>,
}

impl DetectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, detection: RawDetection) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(detection);
    }

    /// Detections recorded so far, in append order
    pub fn snapshot(&self) -> Vec<RawDetection> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The aggregated view of one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDevice {
    pub address: Ipv4Addr,
    pub name: String,
    pub method: String,
    pub descriptor_location: Option<String>,
}

impl ResolvedDevice {
    /// Label used as the key of the simple name/address view
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.address)
    }
}

impl From<&RawDetection> for ResolvedDevice {
    fn from(detection: &RawDetection) -> Self {
        Self {
            address: detection.address,
            name: detection.display_name.clone(),
            method: detection.method.clone(),
            descriptor_location: detection.descriptor_location.clone(),
        }
    }
}

/// Value of the detailed address view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    pub name: String,
    pub method: String,
    #[serde(rename = "location")]
    pub descriptor_location: Option<String>,
}

impl From<&ResolvedDevice> for DeviceRecord {
    fn from(device: &ResolvedDevice) -> Self {
        Self {
            name: device.name.clone(),
            method: device.method.clone(),
            descriptor_location: device.descriptor_location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_set_clones_share_storage() {
        let set = DetectionSet::new();
        let handle = set.clone();
        handle.push(RawDetection::new(Ipv4Addr::new(10, 0, 0, 2), "Roku TV", "ECP"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.snapshot()[0].method, "ECP");
    }

    #[test]
    fn concurrent_pushes_are_all_kept() {
        let set = DetectionSet::new();
        let threads: Vec<_> = (0..8u8)
            .map(|t| {
                let set = set.clone();
                std::thread::spawn(move || {
                    for host in 0..100u8 {
                        let ip = Ipv4Addr::new(10, 0, t, host);
                        set.push(RawDetection::new(ip, "Apple TV", "Port_7000"));
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(set.len(), 800);
    }

    #[test]
    fn generic_names_are_flagged() {
        let ip = Ipv4Addr::new(192, 168, 1, 5);
        assert!(RawDetection::new(ip, "Unknown Smart TV", "SSDP").is_generic());
        assert!(!RawDetection::new(ip, "Samsung Smart TV", "WebSocket_8001").is_generic());
    }

    #[test]
    fn label_combines_name_and_address() {
        let ip = Ipv4Addr::new(192, 168, 1, 20);
        let detection = RawDetection::new(ip, "LG WebOS TV", "HTTP_3000");
        assert_eq!(ResolvedDevice::from(&detection).label(), "LG WebOS TV (192.168.1.20)");
    }
}
