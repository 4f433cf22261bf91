pub mod discover;
pub mod info;

use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use hostmap_common::config::{Config, DEFAULT_WORKERS};

#[derive(Parser)]
#[command(name = "hostmap")]
#[command(about = "Find reachable hosts on an IPv4 range.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Echo-request timeout per host, in milliseconds
    #[arg(short, long, global = true, default_value_t = 1000)]
    pub timeout_ms: u64,

    /// Number of hosts probed concurrently
    #[arg(short = 'j', long, global = true, default_value_t = DEFAULT_WORKERS as u32,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: u32,

    /// Skip reverse-DNS hostname lookups
    #[arg(long, global = true)]
    pub no_dns: bool,

    /// Also list hosts that did not answer
    #[arg(short, long, global = true)]
    pub all: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the local network this device is attached to
    #[command(alias = "i")]
    Info,
    /// Discover hosts in a range: a.b.c.d/n, a.b.c.d-e.f.g.h or a.b.c.d
    #[command(alias = "d")]
    Discover {
        /// Defaults to the detected local network
        target: Option<String>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            timeout: Duration::from_millis(self.timeout_ms),
            workers: self.workers as usize,
            no_dns: self.no_dns,
            show_offline: self.all,
        }
    }
}
