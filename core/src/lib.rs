//! Concurrent IPv4 host discovery.
//!
//! Probes every address of a range with the platform `ping`, then enriches
//! reachable hosts with a hostname, hardware address and vendor.

pub mod discovery;
pub mod scanner;
pub mod system;
pub mod vendors;

pub use discovery::{DiscoveryService, discover, scan};
