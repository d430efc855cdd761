use crate::constants::ROUTE_PROBE_ADDR;
use crate::errors::DiscoveryError;
use network_interface::{NetworkInterface, NetworkInterfaceConfig};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Local address resolution and the /24 range derived from it
pub mod subnet {
    use super::*;

    /// Outward-facing IPv4 address of this host, or loopback if none is found
    pub fn local_ipv4() -> Ipv4Addr {
        match route_source_address() {
            Ok(ip) => ip,
            Err(e) => {
                tracing::debug!(error = %e, "could not resolve local address, using loopback");
                Ipv4Addr::LOCALHOST
            }
        }
    }

    /// Connecting a UDP socket sends nothing; it only makes the OS pick the
    /// source address it would route through.
    fn route_source_address() -> std::io::Result<Ipv4Addr> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(ROUTE_PROBE_ADDR)?;
        match socket.local_addr()?.ip() {
            IpAddr::V4(ip) if !ip.is_unspecified() => Ok(ip),
            other => Err(std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                format!("no usable IPv4 source address (got {})", other),
            )),
        }
    }

    /// A /24 network identified by its first three octets
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Subnet {
        prefix: [u8; 3],
    }

    impl Subnet {
        pub fn from_host(ip: Ipv4Addr) -> Self {
            let [a, b, c, _] = ip.octets();
            Self { prefix: [a, b, c] }
        }

        /// The /24 containing `local_ipv4()`
        pub fn local() -> Self {
            Self::from_host(local_ipv4())
        }

        pub fn contains(&self, ip: Ipv4Addr) -> bool {
            ip.octets()[..3] == self.prefix
        }

        /// Host addresses whose last octet lies in the inclusive range
        pub fn hosts(&self, (first, last): (u8, u8)) -> Vec<Ipv4Addr> {
            let [a, b, c] = self.prefix;
            (first..=last).map(|d| Ipv4Addr::new(a, b, c, d)).collect()
        }
    }

    impl fmt::Display for Subnet {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let [a, b, c] = self.prefix;
            write!(f, "{}.{}.{}.0/24", a, b, c)
        }
    }
}

/// Network interface lookup, used when the caller pins an interface
pub mod interface {
    use super::subnet::Subnet;
    use super::*;

    /// An interface with a usable IPv4 address
    #[derive(Debug, Clone)]
    pub struct InterfaceAddress {
        pub name: String,
        pub ip: Ipv4Addr,
        pub subnet: Subnet,
    }

    fn usable_ipv4(interface: &NetworkInterface) -> impl Iterator<Item = Ipv4Addr> + '_ {
        interface.addr.iter().filter_map(|addr| match addr.ip() {
            IpAddr::V4(ipv4) if !ipv4.is_loopback() && !ipv4.is_unspecified() => Some(ipv4),
            _ => None,
        })
    }

    /// List all interfaces with their IPv4 addresses and /24 networks
    pub fn list_network_interfaces() -> Result<Vec<InterfaceAddress>, DiscoveryError> {
        let interfaces = NetworkInterface::show()?;
        Ok(interfaces
            .iter()
            .flat_map(|interface| {
                usable_ipv4(interface).map(move |ip| InterfaceAddress {
                    name: interface.name.clone(),
                    ip,
                    subnet: Subnet::from_host(ip),
                })
            })
            .collect())
    }

    /// IPv4 address of the named interface
    pub fn interface_ipv4(interface_name: &str) -> Result<Ipv4Addr, DiscoveryError> {
        let interfaces = NetworkInterface::show()?;
        interfaces
            .iter()
            .filter(|interface| interface.name == interface_name)
            .find_map(|interface| usable_ipv4(interface).next())
            .ok_or_else(|| {
                DiscoveryError::NetworkInterfaceCustom(format!(
                    "Interface '{}' not found or has no valid IPv4 address",
                    interface_name
                ))
            })
    }
}

/// Single-shot TCP and HTTP probes. Failures are reported as "no signal".
pub mod probe {
    use super::*;

    /// Response status and body of a successful HTTP exchange
    #[derive(Debug, Clone)]
    pub struct HttpReply {
        pub status: u16,
        pub body: String,
    }

    impl HttpReply {
        pub fn is_ok(&self) -> bool {
            self.status == 200
        }
    }

    /// Build the client shared by every HTTP probe. Idle connections are
    /// never pooled: each probe opens and closes its own socket, so nothing
    /// carries over from one run to the next.
    pub fn http_client(request_timeout: Duration) -> Result<reqwest::Client, DiscoveryError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(request_timeout)
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()?;
        Ok(client)
    }

    pub async fn tcp_port_open(ip: Ipv4Addr, port: u16, connect_timeout: Duration) -> bool {
        matches!(
            timeout(connect_timeout, TcpStream::connect((ip, port))).await,
            Ok(Ok(_))
        )
    }

    pub async fn http_get(client: &reqwest::Client, url: &str) -> Option<HttpReply> {
        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::trace!(url, error = %e, "HTTP probe failed");
                return None;
            }
        };
        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => Some(HttpReply { status, body }),
            Err(e) => {
                tracing::trace!(url, error = %e, "HTTP body unreadable");
                None
            }
        }
    }
}
