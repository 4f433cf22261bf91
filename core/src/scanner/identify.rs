//! Identity enrichment for hosts that answered the liveness probe.
//!
//! Each lookup is best effort and carries whatever timeout the system
//! resolver or neighbor-table utility applies; the probe timeout does not
//! bound them.

use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use anyhow::{Context, bail};
use async_trait::async_trait;
use hostmap_common::network::host::UNKNOWN_VENDOR;
use tracing::{debug, trace};

use crate::system::Platform;
use crate::vendors::{StaticOuiRepo, VendorRepository};

/// What the enricher learned about one host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub hostname: Option<String>,
    pub hardware_address: Option<String>,
    pub vendor: Option<String>,
}

/// Reverse name lookup for one address.
#[async_trait]
pub trait HostnameResolver: Send + Sync {
    async fn reverse_lookup(&self, addr: Ipv4Addr) -> Option<String>;
}

/// Raw neighbor (ARP) table text for one address.
#[async_trait]
pub trait NeighborTable: Send + Sync {
    async fn query(&self, addr: Ipv4Addr) -> anyhow::Result<String>;
}

/// Uses the operating system's resolver (`getnameinfo`).
pub struct ReverseDns;

#[async_trait]
impl HostnameResolver for ReverseDns {
    async fn reverse_lookup(&self, addr: Ipv4Addr) -> Option<String> {
        let ip = IpAddr::V4(addr);
        let name = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&ip))
            .await
            .ok()?
            .ok()?;
        clean_hostname(&name, addr)
    }
}

/// Runs the platform's neighbor-table utility scoped to one address.
pub struct SystemNeighborTable {
    platform: Platform,
}

impl SystemNeighborTable {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl Default for SystemNeighborTable {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}

#[async_trait]
impl NeighborTable for SystemNeighborTable {
    async fn query(&self, addr: Ipv4Addr) -> anyhow::Result<String> {
        for invocation in self.platform.neighbor_queries(addr) {
            let output = match invocation.command().output().await {
                Ok(output) => output,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    trace!("{} is not installed, trying the next neighbor query", invocation.program);
                    continue;
                }
                Err(e) => return Err(e).with_context(|| format!("running {}", invocation.program)),
            };

            if !output.status.success() {
                bail!("{} exited with {}", invocation.program, output.status);
            }
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        bail!("no neighbor-table utility available")
    }
}

/// Combines hostname, hardware-address and vendor lookups.
pub struct Identifier {
    resolver: Option<Arc<dyn HostnameResolver>>,
    neighbors: Arc<dyn NeighborTable>,
    vendors: Arc<dyn VendorRepository>,
}

impl Identifier {
    /// `resolver` may be `None` to skip hostname lookups entirely.
    pub fn new(
        resolver: Option<Arc<dyn HostnameResolver>>,
        neighbors: Arc<dyn NeighborTable>,
        vendors: Arc<dyn VendorRepository>,
    ) -> Self {
        Self {
            resolver,
            neighbors,
            vendors,
        }
    }

    pub fn system(resolve_hostnames: bool) -> Self {
        let resolver: Option<Arc<dyn HostnameResolver>> = if resolve_hostnames {
            Some(Arc::new(ReverseDns))
        } else {
            None
        };
        Self::new(resolver, Arc::new(SystemNeighborTable::default()), Arc::new(StaticOuiRepo))
    }

    pub async fn identify(&self, addr: Ipv4Addr) -> Identity {
        let hostname = match &self.resolver {
            Some(resolver) => resolver.reverse_lookup(addr).await,
            None => None,
        };

        let hardware_address = match self.neighbors.query(addr).await {
            Ok(output) => find_hardware_address(&output, addr),
            Err(e) => {
                debug!("Neighbor lookup for {addr} failed: {e:#}");
                None
            }
        };

        let vendor = hardware_address.as_deref().map(|mac| {
            self.vendors
                .get_vendor(mac)
                .unwrap_or_else(|| UNKNOWN_VENDOR.to_string())
        });

        Identity {
            hostname,
            hardware_address,
            vendor,
        }
    }
}

/// Strips one trailing dot. Empty names and bare address echoes count as unresolved.
pub fn clean_hostname(name: &str, addr: Ipv4Addr) -> Option<String> {
    let name = name.trim();
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.parse::<Ipv4Addr>().is_ok_and(|ip| ip == addr) {
        return None;
    }
    Some(name.to_string())
}

/// Finds the hardware address for `addr` in neighbor-table output.
///
/// Only lines that mention `addr` as a whole token are considered
/// (`(10.0.0.1)` counts, `10.0.0.10` does not).
pub fn find_hardware_address(output: &str, addr: Ipv4Addr) -> Option<String> {
    let wanted = addr.to_string();
    output
        .lines()
        .filter(|line| {
            line.split_whitespace()
                .any(|token| token.trim_matches(|c| c == '(' || c == ')') == wanted)
        })
        .flat_map(str::split_whitespace)
        .find_map(normalize_hardware_address)
}

/// Six groups of one or two hex digits joined uniformly by `:` or `-`.
fn normalize_hardware_address(token: &str) -> Option<String> {
    let separator = if token.contains(':') { ':' } else { '-' };
    let groups: Vec<&str> = token.split(separator).collect();

    if groups.len() != 6 {
        return None;
    }
    let well_formed = groups
        .iter()
        .all(|g| (1..=2).contains(&g.len()) && g.chars().all(|c| c.is_ascii_hexdigit()));
    if !well_formed {
        return None;
    }

    let normalized: Vec<String> = groups
        .iter()
        .map(|g| format!("{:0>2}", g.to_ascii_uppercase()))
        .collect();
    Some(normalized.join(&separator.to_string()))
}
