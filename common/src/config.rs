use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_WORKERS: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    /// How long a single echo request may wait for a reply.
    pub timeout: Duration,
    /// Number of concurrent probe-and-enrich workers. Never below 1.
    pub workers: usize,
    /// Disables reverse-DNS lookups for reachable hosts.
    ///
    /// Neighbor-table and vendor lookups still run.
    pub no_dns: bool,
    /// Render unreachable hosts as well.
    pub show_offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            workers: DEFAULT_WORKERS,
            no_dns: false,
            show_offline: false,
        }
    }
}
