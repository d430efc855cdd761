use crate::model::{DeviceRecord, RawDetection, ResolvedDevice};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::net::Ipv4Addr;

/// Ranking used to pick one detection per address: generic names score zero,
/// specific names score their length.
pub fn name_score(detection: &RawDetection) -> usize {
    if detection.is_generic() {
        0
    } else {
        detection.display_name.chars().count()
    }
}

/// Reduce raw detections to one device per address, in first-seen order.
///
/// Equal scores keep the earlier detection.
pub fn resolve(detections: &[RawDetection]) -> Vec<ResolvedDevice> {
    let mut order = Vec::new();
    let mut best: HashMap<Ipv4Addr, &RawDetection> = HashMap::new();

    for detection in detections {
        match best.entry(detection.address) {
            Entry::Vacant(slot) => {
                order.push(detection.address);
                slot.insert(detection);
            }
            Entry::Occupied(mut slot) => {
                if name_score(detection) > name_score(slot.get()) {
                    slot.insert(detection);
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|address| best.remove(&address))
        .map(ResolvedDevice::from)
        .collect()
}

/// `"<name> (<address>)"` to address
pub fn label_map(devices: &[ResolvedDevice]) -> BTreeMap<String, Ipv4Addr> {
    devices
        .iter()
        .map(|device| (device.label(), device.address))
        .collect()
}

pub fn detailed_map(devices: &[ResolvedDevice]) -> BTreeMap<Ipv4Addr, DeviceRecord> {
    devices
        .iter()
        .map(|device| (device.address, DeviceRecord::from(device)))
        .collect()
}
