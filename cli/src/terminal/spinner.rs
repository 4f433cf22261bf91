use std::sync::Arc;

use hostmap_core::scanner::ProgressCallback;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn discovery_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:30.green/bright_black}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICKS)
        .progress_chars("━╸ ")
}

/// A span that renders as a progress bar over `total` hosts while entered.
pub fn discovery_span(total: usize) -> Span {
    let span = info_span!("discovery", indicatif.pb_show = true);
    span.pb_set_style(&discovery_style());
    span.pb_set_length(total as u64);
    span.pb_set_message("Probing hosts");
    span
}

/// Moves the span's bar to the collector's completed count.
pub fn progress_callback(span: Span) -> ProgressCallback {
    Arc::new(move |completed, _total| {
        span.pb_set_position(completed as u64);
    })
}
