//! # Network Discovery Service
//!
//! Implements the "discover hosts in a range" use case.
//!
//! This service pairs a [`LivenessProber`] with an [`Identifier`] and hands the
//! combination to the worker pool in [`scanner`](crate::scanner).

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hostmap_common::config::Config;
use hostmap_common::error::TargetError;
use hostmap_common::network::host::{HostRecord, ScanSummary};
use hostmap_common::network::range::AddressRange;
use tracing::info;

use crate::scanner::identify::Identifier;
use crate::scanner::probe::{LivenessProber, PingProber};
use crate::scanner::{self, HostScanner, ProgressCallback};

/// Application service for host discovery.
///
/// For every address:
/// 1. **Probing**: one echo request decides reachability and latency.
/// 2. **Enrichment**: reachable hosts get a hostname, hardware address and vendor.
#[derive(Clone)]
pub struct DiscoveryService {
    prober: Arc<dyn LivenessProber>,
    identifier: Arc<Identifier>,
    progress: Option<ProgressCallback>,
}

impl DiscoveryService {
    pub fn new(prober: Arc<dyn LivenessProber>, identifier: Identifier) -> Self {
        Self {
            prober,
            identifier: Arc::new(identifier),
            progress: None,
        }
    }

    /// Uses the system `ping`, resolver and neighbor table.
    pub fn system(cfg: &Config) -> Self {
        Self::new(Arc::new(PingProber::default()), Identifier::system(!cfg.no_dns))
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Probes and enriches every address with `worker_count` concurrent workers.
    pub async fn scan(&self, addresses: Vec<Ipv4Addr>, timeout: Duration, worker_count: usize) -> ScanSummary {
        let progress = self.progress.clone();
        let this: Arc<dyn HostScanner> = Arc::new(self.clone());
        scanner::run_pool(this, addresses, timeout, worker_count, progress).await
    }

    /// Parses `range`, then scans it with the timeout and worker count from `cfg`.
    pub async fn discover(&self, range: &str, cfg: &Config) -> Result<ScanSummary, TargetError> {
        let target = AddressRange::parse(range)?;
        let addresses = target.expand();
        info!("Probing {} address(es) in {target} with {} worker(s)", addresses.len(), cfg.workers.max(1));

        let summary = self.scan(addresses, cfg.timeout, cfg.workers).await;
        Ok(summary.with_range(range.trim()))
    }
}

#[async_trait]
impl HostScanner for DiscoveryService {
    async fn scan_host(&self, addr: Ipv4Addr, timeout: Duration) -> HostRecord {
        let outcome = self.prober.probe(addr, timeout).await;
        let record = HostRecord::new(addr);

        if !outcome.reachable {
            return record.unreachable(outcome.latency, outcome.error);
        }

        let identity = self.identifier.identify(addr).await;
        record
            .reachable(outcome.latency)
            .with_hostname(identity.hostname)
            .with_hardware_address(identity.hardware_address, identity.vendor)
    }
}

/// Scans `addresses` using the system utilities and default enrichment.
pub async fn scan(addresses: Vec<Ipv4Addr>, timeout: Duration, worker_count: usize) -> ScanSummary {
    DiscoveryService::system(&Config::default())
        .scan(addresses, timeout, worker_count)
        .await
}

/// Parses `range` and scans it with the system utilities.
pub async fn discover(range: &str, cfg: &Config) -> Result<ScanSummary, TargetError> {
    DiscoveryService::system(cfg).discover(range, cfg).await
}
