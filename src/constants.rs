/// SSDP multicast group and port that M-SEARCH queries are sent to
pub const SSDP_MULTICAST_ADDR: &str = "239.255.255.250:1900";

/// Maximum wait (seconds) advertised to responders in the MX header
pub const SSDP_MX: u8 = 3;

/// Search targets queried on every run, one M-SEARCH each
pub const SSDP_SEARCH_TARGETS: &[&str] = &[
    "upnp:rootdevice",
    "urn:dial-multiscreen-org:service:dial:1",
    "urn:schemas-upnp-org:device:MediaRenderer:1",
    "urn:schemas-upnp-org:device:MediaServer:1",
    "roku:ecp",
];

/// Namespace of UPnP device description documents
pub const UPNP_DEVICE_NAMESPACE: &str = "urn:schemas-upnp-org:device-1-0";

/// Label used when a descriptor yields no usable name
pub const GENERIC_DEVICE_NAME: &str = "Unknown Smart TV";

/// Names containing this marker lose against any specific name
pub const GENERIC_NAME_MARKER: &str = "Unknown";

/// Public address the resolver "connects" a UDP socket to. Nothing is sent.
pub const ROUTE_PROBE_ADDR: &str = "8.8.8.8:80";
