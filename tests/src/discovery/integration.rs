#![cfg(test)]
use async_trait::async_trait;
use hostmap_common::config::Config;
use hostmap_common::error::TargetError;
use hostmap_common::network::host::{HostRecord, ScanSummary};
use hostmap_common::network::range::AddressRange;
use hostmap_core::DiscoveryService;
use hostmap_core::scanner::identify::{HostnameResolver, Identifier, NeighborTable};
use hostmap_core::scanner::probe::{LivenessProber, ProbeOutcome};
use hostmap_core::vendors::StaticOuiRepo;
use std::net::Ipv4Addr;
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

/// Hosts whose last octet is a multiple of three answer, after a short jittered delay.
struct EveryThird;

#[async_trait]
impl LivenessProber for EveryThird {
    async fn probe(&self, addr: Ipv4Addr, _timeout: Duration) -> ProbeOutcome {
        let last = addr.octets()[3];
        tokio::time::sleep(Duration::from_millis(u64::from(last % 5))).await;
        ProbeOutcome {
            reachable: last % 3 == 0,
            latency: Duration::from_millis(u64::from(last % 5)),
            error: None,
        }
    }
}

struct NoNames;

#[async_trait]
impl HostnameResolver for NoNames {
    async fn reverse_lookup(&self, _addr: Ipv4Addr) -> Option<String> {
        None
    }
}

struct EmptyTable;

#[async_trait]
impl NeighborTable for EmptyTable {
    async fn query(&self, _addr: Ipv4Addr) -> anyhow::Result<String> {
        Ok(String::new())
    }
}

fn offline_service() -> DiscoveryService {
    let resolver: Arc<dyn HostnameResolver> = Arc::new(NoNames);
    let identifier = Identifier::new(Some(resolver), Arc::new(EmptyTable), Arc::new(StaticOuiRepo));
    DiscoveryService::new(Arc::new(EveryThird), identifier)
}

fn assert_consistent(summary: &ScanSummary) {
    let reachable = summary.records.iter().filter(|r| r.is_reachable).count();
    assert_eq!(summary.reachable_count, reachable);
    assert_eq!(summary.total_count, summary.records.len());
}

/// `ping` may be missing or lack privileges inside containers.
fn system_ping_works() -> bool {
    let args: &[&str] = if cfg!(target_os = "windows") {
        &["-n", "1", "-w", "1000", "127.0.0.1"]
    } else {
        &["-c", "1", "127.0.0.1"]
    };
    Command::new("ping")
        .args(args)
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

#[tokio::test]
async fn worker_count_does_not_change_results() {
    let addrs: Vec<Ipv4Addr> = AddressRange::parse("10.20.30.0/26").unwrap().expand();
    let n = addrs.len();
    let svc = offline_service();

    let mut counts = Vec::new();
    for workers in [1, 10, n + 10] {
        let summary = svc.scan(addrs.clone(), Duration::from_millis(100), workers).await;
        assert_consistent(&summary);
        counts.push((summary.records.len(), summary.reachable_count));
    }

    // 0, 3, ..., 63
    assert_eq!(counts, vec![(64, 22); 3]);
}

#[tokio::test]
async fn records_cover_the_whole_range_once() {
    let cfg = Config {
        workers: 7,
        ..Config::default()
    };
    let summary = offline_service()
        .discover("192.168.50.10 - 192.168.50.40", &cfg)
        .await
        .unwrap();

    assert_eq!(summary.range, "192.168.50.10 - 192.168.50.40");
    assert_eq!(summary.total_count, 31);

    let addresses: Vec<Ipv4Addr> = summary.sorted_records().iter().map(|r| r.address).collect();
    let expected: Vec<Ipv4Addr> = (10..=40).map(|i| Ipv4Addr::new(192, 168, 50, i)).collect();
    assert_eq!(addresses, expected);
}

#[tokio::test]
async fn invalid_targets_fail_before_scanning() {
    let svc = offline_service();
    let cfg = Config::default();

    assert!(matches!(
        svc.discover("invalid.ip.address", &cfg).await,
        Err(TargetError::InvalidAddress(_))
    ));
    assert!(matches!(
        svc.discover("192.168.1.0/40", &cfg).await,
        Err(TargetError::InvalidCidr(_))
    ));
    assert!(matches!(
        svc.discover("10.0.0.1-10.0.0.x", &cfg).await,
        Err(TargetError::InvalidRangeFormat(_))
    ));
}

/// Probes 127.0.0.1 with the real system `ping`.
#[tokio::test]
async fn discovery_single_loopback() {
    if !system_ping_works() {
        eprintln!("Skipping loopback test: system ping cannot reach 127.0.0.1.");
        return;
    }

    let localhost = Ipv4Addr::LOCALHOST;
    let summary = hostmap_core::scan(vec![localhost], Duration::from_millis(1000), 10).await;

    assert_eq!(summary.total_count, 1);
    assert_eq!(summary.records.len(), 1);
    assert_eq!(summary.reachable_count, 1);

    let host: &HostRecord = &summary.records[0];
    assert_eq!(host.address, localhost);
    assert!(host.is_reachable, "Localhost should be alive: {:?}", host.probe_error);
    assert!(host.latency > Duration::ZERO);
}

#[tokio::test]
async fn discovery_range_loopback() {
    if !system_ping_works() {
        eprintln!("Skipping loopback range test: system ping cannot reach 127.0.0.1.");
        return;
    }

    let cfg = Config {
        no_dns: true,
        ..Config::default()
    };
    let summary = hostmap_core::discover("127.0.0.1-127.0.0.3", &cfg).await.unwrap();

    assert_consistent(&summary);
    assert_eq!(summary.records.len(), 3, "Found incorrect amount of records");
    assert!(summary.records.iter().all(|r| r.hostname.is_none()));
}
