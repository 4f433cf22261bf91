//! Liveness probing through the platform's `ping` utility.

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use hostmap_common::error::ProbeError;
use tokio::time::timeout as deadline;
use tracing::debug;

use crate::system::{Invocation, Platform};

/// Extra time a `ping` process gets beyond its own timeout before it is killed.
const PROCESS_GRACE: Duration = Duration::from_secs(2);

/// Longest stderr excerpt kept on a failed probe.
const MAX_DETAIL_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub reachable: bool,
    pub latency: Duration,
    pub error: Option<ProbeError>,
}

/// Decides whether one address answers within `timeout`.
///
/// Failures are outcomes, not errors: an offline host is the common case.
#[async_trait]
pub trait LivenessProber: Send + Sync {
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> ProbeOutcome;
}

/// Sends a single echo request by running the system `ping`.
pub struct PingProber {
    platform: Platform,
    command: Option<(&'static str, Vec<String>)>,
}

impl PingProber {
    pub fn new(platform: Platform) -> Self {
        Self { platform, command: None }
    }

    /// Runs `program <args..> <addr>` in place of the platform `ping`.
    ///
    /// The exit status and the hard deadline are interpreted exactly as for `ping`.
    pub fn with_program(mut self, program: &'static str, args: &[&str]) -> Self {
        let args = args.iter().map(|arg| arg.to_string()).collect();
        self.command = Some((program, args));
        self
    }

    fn invocation(&self, addr: Ipv4Addr, timeout: Duration) -> Result<Invocation, ProbeError> {
        match &self.command {
            Some((program, args)) => {
                let mut args = args.clone();
                args.push(addr.to_string());
                Ok(Invocation::new(*program, args))
            }
            None => self.platform.ping(addr, timeout),
        }
    }

    async fn ping(&self, addr: Ipv4Addr, timeout: Duration) -> Result<(), ProbeError> {
        let invocation: Invocation = self.invocation(addr, timeout)?;

        let output = deadline(timeout + PROCESS_GRACE, invocation.command().output())
            .await
            .map_err(|_| ProbeError::TimedOut(timeout))?
            .map_err(|e| ProbeError::Launch {
                utility: invocation.program,
                reason: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        Err(ProbeError::Failed {
            status: output.status.to_string(),
            detail: failure_detail(&output.stderr),
        })
    }
}

impl Default for PingProber {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}

#[async_trait]
impl LivenessProber for PingProber {
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> ProbeOutcome {
        let start = Instant::now();
        let result = self.ping(addr, timeout).await;
        let latency = start.elapsed();

        match result {
            Ok(()) => {
                debug!("{addr} answered in {latency:?}");
                ProbeOutcome { reachable: true, latency, error: None }
            }
            Err(e) => {
                debug!("{addr} did not answer: {e}");
                ProbeOutcome { reachable: false, latency, error: Some(e) }
            }
        }
    }
}

/// `": <first stderr line>"`, or empty when the utility said nothing.
fn failure_detail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    match text.lines().map(str::trim).find(|line| !line.is_empty()) {
        Some(line) => {
            let excerpt: String = line.chars().take(MAX_DETAIL_LEN).collect();
            format!(": {excerpt}")
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_detail_takes_first_non_empty_line() {
        assert_eq!(failure_detail(b"\n  ping: unknown host\nmore\n"), ": ping: unknown host");
        assert_eq!(failure_detail(b""), "");
        assert_eq!(failure_detail(b"   \n"), "");
    }

    #[test]
    fn failure_detail_is_bounded() {
        let long = "x".repeat(MAX_DETAIL_LEN * 2);
        assert_eq!(failure_detail(long.as_bytes()).len(), MAX_DETAIL_LEN + 2);
    }

    #[tokio::test]
    async fn unsupported_platform_marks_host_unreachable() {
        let prober = PingProber::new(Platform::Unsupported("plan9"));
        let outcome = prober.probe(Ipv4Addr::LOCALHOST, Duration::from_millis(100)).await;

        assert!(!outcome.reachable);
        assert_eq!(outcome.error, Some(ProbeError::UnsupportedPlatform("plan9".into())));
    }

    #[cfg(unix)]
    fn stand_in(script: &str) -> PingProber {
        // the address lands in `$0`
        PingProber::new(Platform::Linux).with_program("sh", &["-c", script])
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn zero_exit_status_means_reachable() {
        let prober = PingProber::new(Platform::Linux).with_program("true", &[]);
        let outcome = prober.probe(Ipv4Addr::LOCALHOST, Duration::from_millis(500)).await;

        assert!(outcome.reachable, "{:?}", outcome.error);
        assert_eq!(outcome.error, None);
        assert!(outcome.latency > Duration::ZERO);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_status_is_a_failed_probe() {
        let prober = PingProber::new(Platform::Linux).with_program("false", &[]);
        let outcome = prober.probe(Ipv4Addr::new(10, 0, 0, 1), Duration::from_millis(500)).await;

        assert!(!outcome.reachable);
        assert!(matches!(outcome.error, Some(ProbeError::Failed { .. })), "{:?}", outcome.error);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failed_probe_keeps_first_stderr_line() {
        let prober = stand_in("echo 'ping: host down' >&2; exit 1");
        let outcome = prober.probe(Ipv4Addr::new(10, 0, 0, 1), Duration::from_millis(500)).await;

        match outcome.error {
            Some(ProbeError::Failed { detail, .. }) => assert_eq!(detail, ": ping: host down"),
            other => panic!("expected a failed probe, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hung_process_is_killed_after_grace_period() {
        let timeout = Duration::from_millis(100);
        let prober = stand_in("sleep 10");
        let outcome = prober.probe(Ipv4Addr::new(192, 0, 2, 1), timeout).await;

        assert!(!outcome.reachable);
        assert_eq!(outcome.error, Some(ProbeError::TimedOut(timeout)));
        assert!(outcome.latency >= timeout + PROCESS_GRACE);
        assert!(outcome.latency < Duration::from_secs(10), "latency {:?}", outcome.latency);
    }

    #[tokio::test]
    async fn missing_program_is_a_launch_error() {
        let prober = PingProber::new(Platform::Linux).with_program("hostmap-no-such-ping", &[]);
        let outcome = prober.probe(Ipv4Addr::LOCALHOST, Duration::from_millis(100)).await;

        assert!(!outcome.reachable);
        assert!(matches!(
            outcome.error,
            Some(ProbeError::Launch { utility: "hostmap-no-such-ping", .. })
        ));
    }
}
