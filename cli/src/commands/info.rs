use anyhow::Context;
use colored::*;

use crate::terminal::{colors, print};
use hostmap_common::network::interface;
use hostmap_common::network::range::AddressRange;

pub fn info() -> anyhow::Result<()> {
    let network: String = interface::detect_local_network().context("cannot show the local network")?;
    let range = AddressRange::parse(&network)?;

    print::aligned_line("Network", network.color(colors::IPV4_PREFIX));
    print::aligned_line("Range", range.to_string().color(colors::IPV4_ADDR));
    print::aligned_line("Hosts", range.len().to_string());
    print::fat_separator();
    Ok(())
}
