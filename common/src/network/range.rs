//! # Address Ranges
//!
//! Turns the textual target of a scan into the ordered list of IPv4
//! addresses the engine probes.
//!
//! Three forms are recognized, checked in this order:
//! * **CIDR**: anything containing `/` (e.g. `192.168.1.0/24`).
//! * **Range**: anything containing `-` (e.g. `192.168.1.1 - 192.168.1.50`).
//! * **Host**: a single dotted-decimal address (e.g. `192.168.1.5`).

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::TargetError;

/// An inclusive span of IPv4 addresses.
///
/// `start <= end` is not enforced; an inverted range simply expands to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    pub start: Ipv4Addr,
    pub end: Ipv4Addr,
}

impl AddressRange {
    pub fn new(start: Ipv4Addr, end: Ipv4Addr) -> Self {
        Self { start, end }
    }

    pub fn single(addr: Ipv4Addr) -> Self {
        Self::new(addr, addr)
    }

    /// Parses a CIDR block, a dash-separated range or a single address.
    pub fn parse(text: &str) -> Result<Self, TargetError> {
        let text = text.trim();

        if text.contains('/') {
            return parse_cidr(text);
        }

        if text.contains('-') {
            return parse_dash_range(text);
        }

        text.parse::<Ipv4Addr>()
            .map(Self::single)
            .map_err(|_| TargetError::InvalidAddress(text.to_string()))
    }

    /// Number of addresses the range covers.
    pub fn len(&self) -> u64 {
        let start: u32 = self.start.into();
        let end: u32 = self.end.into();
        match end.checked_sub(start) {
            Some(span) => u64::from(span) + 1,
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lazily walks every address from `start` through `end` in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> + use<> {
        let start: u32 = self.start.into();
        let end: u32 = self.end.into();
        (start..=end).map(Ipv4Addr::from)
    }

    /// Materializes the range.
    pub fn expand(&self) -> Vec<Ipv4Addr> {
        let mut addrs = Vec::with_capacity(self.len() as usize);
        addrs.extend(self.iter());
        addrs
    }
}

impl FromStr for AddressRange {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Parses `a.b.c.d/n` into the block's network and broadcast addresses.
fn parse_cidr(text: &str) -> Result<AddressRange, TargetError> {
    let invalid = || TargetError::InvalidCidr(text.to_string());

    let (ip_str, prefix_str) = text.split_once('/').ok_or_else(invalid)?;
    let ip: Ipv4Addr = ip_str.trim().parse().map_err(|_| invalid())?;
    let prefix_str = prefix_str.trim();
    // `u8::from_str` also takes a leading `+`
    if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let prefix: u8 = prefix_str.parse().map_err(|_| invalid())?;

    let network = Ipv4Network::new(ip, prefix).map_err(|_| invalid())?;

    Ok(AddressRange::new(network.network(), network.broadcast()))
}

/// Parses `a.b.c.d-e.f.g.h`, each side trimmed independently.
fn parse_dash_range(text: &str) -> Result<AddressRange, TargetError> {
    let invalid = || TargetError::InvalidRangeFormat(text.to_string());

    let parts: Vec<&str> = text.split('-').collect();
    let [start_str, end_str] = parts.as_slice() else {
        return Err(invalid());
    };

    let start: Ipv4Addr = start_str.trim().parse().map_err(|_| invalid())?;
    let end: Ipv4Addr = end_str.trim().parse().map_err(|_| invalid())?;

    Ok(AddressRange::new(start, end))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
