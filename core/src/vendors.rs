use std::collections::HashMap;
use std::sync::OnceLock;

use hostmap_common::network::host::UNKNOWN_VENDOR;

/// Known **Organizationally Unique Identifier** prefixes, as six upper-case hex digits.
const OUI_TABLE: &[(&str, &str)] = &[
    ("00000C", "Cisco Systems"),
    ("000C29", "VMware"),
    ("000D3A", "Microsoft"),
    ("00155D", "Microsoft Hyper-V"),
    ("00163E", "Xen"),
    ("001C42", "Parallels"),
    ("005056", "VMware"),
    ("080027", "Oracle VirtualBox"),
    ("28CDC1", "Apple"),
    ("3C0754", "Apple"),
    ("525400", "QEMU/KVM"),
    ("ACDE48", "Apple"),
    ("B827EB", "Raspberry Pi Foundation"),
    ("D8BBC1", "Micro-Star International"),
    ("DCA632", "Raspberry Pi Foundation"),
    ("E45F01", "Raspberry Pi Foundation"),
    ("F8FFC2", "Apple"),
];

static OUI_DB: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

/// Built on first use and never written again, so lookups need no locking.
fn get_oui_db() -> &'static HashMap<&'static str, &'static str> {
    OUI_DB.get_or_init(|| OUI_TABLE.iter().copied().collect())
}

/// Source of vendor names for hardware addresses.
pub trait VendorRepository: Send + Sync {
    fn get_vendor(&self, hardware_address: &str) -> Option<String>;
}

/// The built-in prefix table.
pub struct StaticOuiRepo;

impl VendorRepository for StaticOuiRepo {
    fn get_vendor(&self, hardware_address: &str) -> Option<String> {
        lookup(hardware_address).map(str::to_string)
    }
}

/// Vendor for `hardware_address`, or `"Unknown"` when it is empty or unmapped.
///
/// Accepts colon- or hyphen-separated addresses in either letter case.
pub fn vendor_for(hardware_address: &str) -> &'static str {
    lookup(hardware_address).unwrap_or(UNKNOWN_VENDOR)
}

fn lookup(hardware_address: &str) -> Option<&'static str> {
    let prefix = oui_prefix(hardware_address)?;
    get_oui_db().get(prefix.as_str()).copied()
}

/// First three octets as six upper-case hex digits.
fn oui_prefix(hardware_address: &str) -> Option<String> {
    let mut prefix = String::with_capacity(6);
    for octet in hardware_address.trim().split([':', '-']).take(3) {
        if octet.is_empty() || octet.len() > 2 || !octet.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        if octet.len() == 1 {
            prefix.push('0');
        }
        prefix.push_str(&octet.to_ascii_uppercase());
    }
    (prefix.len() == 6).then_some(prefix)
}
