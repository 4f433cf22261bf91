use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use tracing::debug;

use crate::error::TargetError;

/// Returns the local IPv4 network in CIDR form (e.g. `192.168.1.23/24`).
///
/// The result is accepted as-is by [`AddressRange::parse`](crate::network::range::AddressRange::parse),
/// which masks off the host bits.
pub fn detect_local_network() -> Result<String, TargetError> {
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    debug!("Inspecting {} network interface(s)", interfaces.len());

    first_ipv4_network(&interfaces)
        .map(|net| format!("{}/{}", net.ip(), net.prefix()))
        .ok_or(TargetError::NoLocalNetworkFound)
}

/// Picks the first non-loopback IPv4 network in interface order.
pub fn first_ipv4_network(interfaces: &[NetworkInterface]) -> Option<Ipv4Network> {
    interfaces
        .iter()
        .flat_map(|interface| interface.ips.iter())
        .find_map(|net| match net {
            IpNetwork::V4(v4) if !v4.ip().is_loopback() => Some(*v4),
            _ => None,
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
