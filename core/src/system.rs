//! Platform-specific command lines for the utilities the scanner shells out to.
//!
//! This is the only place that branches on the operating system; everything
//! above it asks for "a ping command" or "a neighbor-table command".

use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;

use hostmap_common::error::ProbeError;
use tokio::process::Command;

pub const PING: &str = "ping";
pub const ARP: &str = "arp";
pub const IP: &str = "ip";

/// Operating system families, grouped by how their `ping` reads `-w`/`-W`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// `-n <count> -w <milliseconds>`.
    Windows,
    /// macOS and the BSDs: `-c <count> -W <milliseconds>`.
    Bsd,
    /// Linux and remaining Unixes: `-c <count> -W <seconds>`.
    Linux,
    /// No known echo-request convention.
    Unsupported(&'static str),
}

/// A program plus its arguments, not yet spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: &'static str,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: &'static str, args: Vec<String>) -> Self {
        Self { program, args }
    }

    /// Builds the child process. It is killed if the returned future is dropped.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.program);
        cmd.args(&self.args).stdin(Stdio::null()).kill_on_drop(true);
        cmd
    }
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(any(
            target_os = "macos",
            target_os = "ios",
            target_os = "freebsd",
            target_os = "netbsd",
            target_os = "openbsd",
            target_os = "dragonfly"
        )) {
            Platform::Bsd
        } else if cfg!(unix) {
            Platform::Linux
        } else {
            Platform::Unsupported(std::env::consts::OS)
        }
    }

    /// Single echo request to `addr`, giving up after `timeout`.
    pub fn ping(&self, addr: Ipv4Addr, timeout: Duration) -> Result<Invocation, ProbeError> {
        let target = addr.to_string();
        let args = match self {
            Platform::Windows => vec!["-n".into(), "1".into(), "-w".into(), millis(timeout), target],
            Platform::Bsd => vec!["-c".into(), "1".into(), "-W".into(), millis(timeout), target],
            Platform::Linux => vec!["-c".into(), "1".into(), "-W".into(), whole_seconds(timeout), target],
            Platform::Unsupported(os) => return Err(ProbeError::UnsupportedPlatform(os.to_string())),
        };
        Ok(Invocation::new(PING, args))
    }

    /// Neighbor-table queries for `addr`, most preferred first.
    ///
    /// Later entries are only meant as fallbacks when an earlier program is missing.
    pub fn neighbor_queries(&self, addr: Ipv4Addr) -> Vec<Invocation> {
        let target = addr.to_string();
        match self {
            Platform::Windows => vec![Invocation::new(ARP, vec!["-a".into(), target])],
            Platform::Bsd => vec![Invocation::new(ARP, vec!["-n".into(), target])],
            Platform::Linux => vec![
                Invocation::new(IP, vec!["neigh".into(), "show".into(), target.clone()]),
                Invocation::new(ARP, vec!["-n".into(), target]),
            ],
            Platform::Unsupported(_) => Vec::new(),
        }
    }
}

fn millis(timeout: Duration) -> String {
    timeout.as_millis().max(1).to_string()
}

/// Linux `ping -W` only takes whole seconds; round up so short timeouts don't become 0.
fn whole_seconds(timeout: Duration) -> String {
    let secs = timeout.as_millis().div_ceil(1000).max(1);
    secs.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 20);

    fn args(inv: &Invocation) -> Vec<&str> {
        inv.args.iter().map(String::as_str).collect()
    }

    #[test]
    fn windows_ping_uses_milliseconds() {
        let inv = Platform::Windows.ping(TARGET, Duration::from_millis(1500)).unwrap();
        assert_eq!(inv.program, PING);
        assert_eq!(args(&inv), ["-n", "1", "-w", "1500", "192.168.1.20"]);
    }

    #[test]
    fn bsd_ping_uses_milliseconds() {
        let inv = Platform::Bsd.ping(TARGET, Duration::from_millis(250)).unwrap();
        assert_eq!(args(&inv), ["-c", "1", "-W", "250", "192.168.1.20"]);
    }

    #[test]
    fn linux_ping_rounds_up_to_seconds() {
        let short = Platform::Linux.ping(TARGET, Duration::from_millis(300)).unwrap();
        assert_eq!(args(&short), ["-c", "1", "-W", "1", "192.168.1.20"]);

        let long = Platform::Linux.ping(TARGET, Duration::from_millis(2001)).unwrap();
        assert_eq!(args(&long)[3], "3");

        let zero = Platform::Linux.ping(TARGET, Duration::ZERO).unwrap();
        assert_eq!(args(&zero)[3], "1");
    }

    #[test]
    fn unsupported_platform_is_reported() {
        let err = Platform::Unsupported("plan9").ping(TARGET, Duration::from_secs(1)).unwrap_err();
        assert_eq!(err, ProbeError::UnsupportedPlatform("plan9".into()));
        assert!(Platform::Unsupported("plan9").neighbor_queries(TARGET).is_empty());
    }

    #[test]
    fn neighbor_queries_per_platform() {
        let win = Platform::Windows.neighbor_queries(TARGET);
        assert_eq!(win.len(), 1);
        assert_eq!(win[0].program, ARP);
        assert_eq!(args(&win[0]), ["-a", "192.168.1.20"]);

        let linux = Platform::Linux.neighbor_queries(TARGET);
        assert_eq!(linux[0].program, IP);
        assert_eq!(args(&linux[0]), ["neigh", "show", "192.168.1.20"]);
        assert_eq!(linux[1].program, ARP);
        assert_eq!(args(&linux[1]), ["-n", "192.168.1.20"]);
    }

    #[test]
    fn current_platform_is_supported_on_test_hosts() {
        assert!(!matches!(Platform::current(), Platform::Unsupported(_)));
    }
}
