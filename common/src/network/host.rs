use std::net::Ipv4Addr;
use std::time::Duration;

use crate::error::ProbeError;

/// Vendor reported for a hardware address whose prefix is not in the table.
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// Everything learned about one probed address.
///
/// Built once by a worker and handed to the collector untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct HostRecord {
    pub address: Ipv4Addr,
    pub is_reachable: bool,
    /// Wall-clock time around the echo request. Only meaningful when reachable.
    pub latency: Duration,
    pub hostname: Option<String>,
    pub hardware_address: Option<String>,
    /// Set whenever `hardware_address` is, [`UNKNOWN_VENDOR`] if unmapped.
    pub vendor: Option<String>,
    pub probe_error: Option<ProbeError>,
}

impl HostRecord {
    pub fn new(address: Ipv4Addr) -> Self {
        Self {
            address,
            is_reachable: false,
            latency: Duration::ZERO,
            hostname: None,
            hardware_address: None,
            vendor: None,
            probe_error: None,
        }
    }

    pub fn reachable(mut self, latency: Duration) -> Self {
        self.is_reachable = true;
        self.latency = latency;
        self
    }

    pub fn unreachable(mut self, latency: Duration, error: Option<ProbeError>) -> Self {
        self.is_reachable = false;
        self.latency = latency;
        self.probe_error = error;
        self
    }

    pub fn with_hostname(mut self, hostname: Option<String>) -> Self {
        self.hostname = hostname;
        self
    }

    pub fn with_hardware_address(mut self, hardware_address: Option<String>, vendor: Option<String>) -> Self {
        self.hardware_address = hardware_address;
        self.vendor = vendor;
        self
    }
}

/// Result of one complete scan.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    /// Target as the caller wrote it, for display.
    pub range: String,
    pub total_count: usize,
    pub reachable_count: usize,
    /// Completion order, not address order.
    pub records: Vec<HostRecord>,
    pub elapsed: Duration,
}

impl ScanSummary {
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    pub fn reachable(&self) -> impl Iterator<Item = &HostRecord> {
        self.records.iter().filter(|record| record.is_reachable)
    }

    /// Records sorted by address, for presentation.
    pub fn sorted_records(&self) -> Vec<&HostRecord> {
        let mut records: Vec<&HostRecord> = self.records.iter().collect();
        records.sort_by_key(|record| record.address);
        records
    }
}
