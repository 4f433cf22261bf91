use std::time::Duration;

use colored::*;
use hostmap_common::network::host::HostRecord;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn ipv4_to_detail(record: &HostRecord) -> Detail {
    let addr = record.address.to_string().color(colors::IPV4_ADDR);
    ("IPv4".to_string(), addr)
}

pub fn mac_to_detail(mac: &Option<String>) -> Option<Detail> {
    let mac = mac.as_ref()?;
    Some(("MAC".to_string(), mac.color(colors::MAC_ADDR)))
}

pub fn vendor_to_detail(vendor: &Option<String>) -> Option<Detail> {
    let vendor = vendor.as_ref()?;
    Some(("Vendor".to_string(), vendor.normal()))
}

pub fn latency_to_detail(latency: Duration) -> Detail {
    ("Latency".to_string(), format_latency(latency).color(colors::LATENCY))
}

/// Reachable hosts have no status line; offline ones explain why.
pub fn status_to_detail(record: &HostRecord) -> Option<Detail> {
    if record.is_reachable {
        return None;
    }
    let reason = match &record.probe_error {
        Some(e) => e.to_string(),
        None => "no reply".to_string(),
    };
    Some(("Status".to_string(), reason.color(colors::OFFLINE)))
}

pub fn record_to_details(record: &HostRecord) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![ipv4_to_detail(record)];

    details.extend(mac_to_detail(&record.hardware_address));
    details.extend(vendor_to_detail(&record.vendor));
    details.push(latency_to_detail(record.latency));
    details.extend(status_to_detail(record));

    details
}

pub fn format_latency(latency: Duration) -> String {
    if latency < Duration::from_millis(1) {
        format!("{}µs", latency.as_micros())
    } else {
        format!("{:.1}ms", latency.as_secs_f64() * 1000.0)
    }
}
