//! Per-brand probe tables interpreted by `BrandScanner`
//!
//! Probes are tried in the order listed; the first one that sees a signal
//! names the device.

/// How the detection method tag is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodTag {
    /// Same tag whatever the port, e.g. "ADB_PORT"
    Fixed(&'static str),
    /// Prefix joined with the probed port, e.g. "HTTP" -> "HTTP_8008"
    PerPort(&'static str),
}

impl MethodTag {
    pub fn render(&self, port: u16) -> String {
        match self {
            MethodTag::Fixed(tag) => tag.to_string(),
            MethodTag::PerPort(prefix) => format!("{}_{}", prefix, port),
        }
    }
}

/// How a matching HTTP body is turned into a device name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Naming {
    Fixed(&'static str),
    /// `refined` when the lowercased body contains `marker`, else `default`
    Refined {
        default: &'static str,
        marker: &'static str,
        refined: &'static str,
    },
}

impl Naming {
    pub fn resolve(&self, body_lower: &str) -> &'static str {
        match *self {
            Naming::Fixed(name) => name,
            Naming::Refined {
                default,
                marker,
                refined,
            } => {
                if body_lower.contains(marker) {
                    refined
                } else {
                    default
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Signal: a TCP connect succeeds
    TcpOpen {
        port: u16,
        name: &'static str,
        method: MethodTag,
    },
    /// Signal: the body of `GET http://host:port{path}` contains a keyword
    HttpBody {
        port: u16,
        path: &'static str,
        keywords: &'static [&'static str],
        require_ok: bool,
        naming: Naming,
        method: MethodTag,
    },
    /// Signal: Google Cast setup endpoints answer on this port
    CastInfo { port: u16 },
}

#[derive(Debug, PartialEq, Eq)]
pub struct BrandProfile {
    pub brand: &'static str,
    pub probes: &'static [Probe],
}

const HTTP: MethodTag = MethodTag::PerPort("HTTP");

const fn root_page(
    port: u16,
    keywords: &'static [&'static str],
    require_ok: bool,
    naming: Naming,
) -> Probe {
    Probe::HttpBody {
        port,
        path: "/",
        keywords,
        require_ok,
        naming,
        method: HTTP,
    }
}

const ANDROID_KEYWORDS: &[&str] = &["android", "google tv", "chromecast", "cast"];
const ANDROID_NAMING: Naming = Naming::Refined {
    default: "Android TV / Google TV",
    marker: "chromecast",
    refined: "Chromecast / Google TV",
};

pub const ANDROID_TV: BrandProfile = BrandProfile {
    brand: "Android TV",
    probes: &[
        Probe::TcpOpen {
            port: 6467,
            name: "Android TV / Google TV",
            method: MethodTag::Fixed("ADB_PORT"),
        },
        root_page(8008, ANDROID_KEYWORDS, false, ANDROID_NAMING),
        root_page(9000, ANDROID_KEYWORDS, false, ANDROID_NAMING),
        root_page(8080, ANDROID_KEYWORDS, false, ANDROID_NAMING),
        root_page(80, ANDROID_KEYWORDS, false, ANDROID_NAMING),
    ],
};

const SAMSUNG_NAME: &str = "Samsung Smart TV";
const SAMSUNG_WEBSOCKET: MethodTag = MethodTag::PerPort("WebSocket");

pub const SAMSUNG: BrandProfile = BrandProfile {
    brand: "Samsung",
    probes: &[
        Probe::TcpOpen {
            port: 8001,
            name: SAMSUNG_NAME,
            method: SAMSUNG_WEBSOCKET,
        },
        Probe::TcpOpen {
            port: 8002,
            name: SAMSUNG_NAME,
            method: SAMSUNG_WEBSOCKET,
        },
        root_page(8080, &["samsung"], true, Naming::Fixed(SAMSUNG_NAME)),
        root_page(26101, &["samsung"], true, Naming::Fixed(SAMSUNG_NAME)),
    ],
};

const LG_KEYWORDS: &[&str] = &["webos", "lg", "netcast"];
const LG_NAMING: Naming = Naming::Refined {
    default: "LG Smart TV",
    marker: "webos",
    refined: "LG WebOS TV",
};

pub const LG: BrandProfile = BrandProfile {
    brand: "LG",
    probes: &[
        root_page(3000, LG_KEYWORDS, false, LG_NAMING),
        root_page(3001, LG_KEYWORDS, false, LG_NAMING),
        root_page(36866, LG_KEYWORDS, false, LG_NAMING),
        root_page(1061, LG_KEYWORDS, false, LG_NAMING),
    ],
};

pub const CHROMECAST: BrandProfile = BrandProfile {
    brand: "Chromecast",
    probes: &[
        Probe::CastInfo { port: 8008 },
        Probe::CastInfo { port: 8009 },
        Probe::CastInfo { port: 8443 },
    ],
};

pub const ROKU: BrandProfile = BrandProfile {
    brand: "Roku",
    probes: &[
        Probe::HttpBody {
            port: 8060,
            path: "/",
            keywords: &["roku"],
            require_ok: true,
            naming: Naming::Fixed("Roku TV"),
            method: MethodTag::Fixed("ECP"),
        },
        Probe::HttpBody {
            port: 8060,
            path: "/query/device-info",
            keywords: &["roku"],
            require_ok: true,
            naming: Naming::Fixed("Roku TV"),
            method: MethodTag::Fixed("DeviceInfo"),
        },
    ],
};

const APPLE_TV_PORT: MethodTag = MethodTag::PerPort("Port");

pub const APPLE_TV: BrandProfile = BrandProfile {
    brand: "Apple TV",
    probes: &[
        Probe::TcpOpen {
            port: 7000,
            name: "Apple TV",
            method: APPLE_TV_PORT,
        },
        Probe::TcpOpen {
            port: 32498,
            name: "Apple TV",
            method: APPLE_TV_PORT,
        },
        Probe::TcpOpen {
            port: 3689,
            name: "Apple TV",
            method: APPLE_TV_PORT,
        },
    ],
};

const FIRE_TV_NAME: &str = "Amazon Fire TV";

pub const FIRE_TV: BrandProfile = BrandProfile {
    brand: "Fire TV",
    probes: &[
        Probe::TcpOpen {
            port: 5555,
            name: FIRE_TV_NAME,
            method: MethodTag::Fixed("ADB"),
        },
        root_page(8080, &["amazon", "fire"], false, Naming::Fixed(FIRE_TV_NAME)),
        root_page(8008, &["amazon", "fire"], false, Naming::Fixed(FIRE_TV_NAME)),
    ],
};

/// Every brand scanned on a default run
pub const ALL_BRANDS: &[BrandProfile] = &[
    ANDROID_TV, SAMSUNG, LG, CHROMECAST, ROKU, APPLE_TV, FIRE_TV,
];
