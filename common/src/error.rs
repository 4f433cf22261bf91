use std::time::Duration;

use thiserror::Error;

/// Errors that reject a scan request before any probe is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("invalid IP range format: {0}")]
    InvalidRangeFormat(String),

    #[error("no local network found")]
    NoLocalNetworkFound,
}

/// Why a single liveness probe did not report the host as reachable.
///
/// These never abort a scan; they are stored on the host's record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("unsupported operating system: {0}")]
    UnsupportedPlatform(String),

    #[error("failed to launch {utility}: {reason}")]
    Launch { utility: &'static str, reason: String },

    #[error("echo request failed ({status}){detail}")]
    Failed { status: String, detail: String },

    #[error("no answer within {0:?}")]
    TimedOut(Duration),
}
