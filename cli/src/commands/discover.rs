use std::time::Duration;

use anyhow::Context;
use colored::*;
use tracing::{Instrument, info};

use crate::mprint;
use crate::terminal::{colors, format, print, spinner};
use hostmap_common::config::Config;
use hostmap_common::network::host::{HostRecord, ScanSummary};
use hostmap_common::network::interface;
use hostmap_common::network::range::AddressRange;
use hostmap_core::DiscoveryService;

pub async fn discover(target: Option<String>, cfg: &Config) -> anyhow::Result<()> {
    let range: String = match target {
        Some(target) => target,
        None => {
            let network = interface::detect_local_network().context("no target given and auto-detection failed")?;
            info!("Auto-detected local network {network}");
            network
        }
    };

    let addresses = AddressRange::parse(&range)
        .with_context(|| format!("cannot scan '{range}'"))?
        .expand();
    info!("Probing {} address(es) with {} worker(s)", addresses.len(), cfg.workers);

    let span = spinner::discovery_span(addresses.len());
    let service = DiscoveryService::system(cfg).with_progress(spinner::progress_callback(span.clone()));

    let summary = service
        .scan(addresses, cfg.timeout, cfg.workers)
        .instrument(span)
        .await
        .with_range(range.trim());
    // releases the last span handle so the bar clears before results print
    drop(service);

    discovery_ends(&summary, cfg);
    Ok(())
}

fn discovery_ends(summary: &ScanSummary, cfg: &Config) {
    let shown: Vec<&HostRecord> = summary
        .sorted_records()
        .into_iter()
        .filter(|record| record.is_reachable || cfg.show_offline)
        .collect();

    if summary.reachable_count == 0 && shown.is_empty() {
        no_hosts_found();
        print_summary(summary);
        return;
    }

    mprint!();
    print::header("Network Discovery");
    print_hosts(&shown);
    print_summary(summary);
}

fn no_hosts_found() {
    print::header("ZERO HOSTS DETECTED");
    print::no_results();
}

fn print_hosts(records: &[&HostRecord]) {
    for (idx, record) in records.iter().enumerate() {
        print_host_tree(record, idx);
        if idx + 1 != records.len() {
            mprint!();
        }
    }
}

fn print_host_tree(record: &HostRecord, idx: usize) {
    let hostname = record.hostname.as_deref().unwrap_or("No hostname");
    print::tree_head(idx, hostname);
    print::as_tree_one_level(format::record_to_details(record));
}

fn print_summary(summary: &ScanSummary) {
    let reachable: ColoredString = format!("{} of {}", summary.reachable_count, summary.total_count)
        .bold()
        .green();
    let elapsed: ColoredString = format_elapsed(summary.elapsed).bold().yellow();
    let output: ColoredString = format!("{reachable} hosts reachable in {elapsed}").color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(&output.to_string());
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}
