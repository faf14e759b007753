//! # Interface Addresses
//!
//! IPv4 addresses of the VPN and LAN interfaces.

use std::net::{IpAddr, Ipv4Addr};

use network_interface::{NetworkInterface, NetworkInterfaceConfig};

use super::TelemetryError;

/// First IPv4 address bound to `name`
fn find_ipv4<'a, I>(addresses: I, name: &str) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = (&'a str, IpAddr)>,
{
    addresses.into_iter().find_map(|(iface, ip)| match ip {
        IpAddr::V4(v4) if iface == name => Some(v4),
        _ => None,
    })
}

/// First interface of `preferred` (in order) that has an IPv4 address
fn find_first_ipv4<'a, I>(addresses: I, preferred: &[String]) -> Option<(String, Ipv4Addr)>
where
    I: IntoIterator<Item = (&'a str, IpAddr)> + Clone,
{
    preferred
        .iter()
        .find_map(|name| find_ipv4(addresses.clone(), name).map(|ip| (name.clone(), ip)))
}

fn list_interfaces() -> Result<Vec<NetworkInterface>, TelemetryError> {
    NetworkInterface::show()
        .map_err(|e| TelemetryError::Unsupported(format!("interface list: {}", e)))
}

fn flatten(interfaces: &[NetworkInterface]) -> Vec<(&str, IpAddr)> {
    interfaces
        .iter()
        .flat_map(|itf| itf.addr.iter().map(move |addr| (itf.name.as_str(), addr.ip())))
        .collect()
}

/// IPv4 address of a single interface
///
/// # Errors
///
/// Returns `InterfaceOffline` if the interface is absent or has no IPv4 address
pub fn interface_ipv4(name: &str) -> Result<Ipv4Addr, TelemetryError> {
    let interfaces = list_interfaces()?;
    find_ipv4(flatten(&interfaces), name)
        .ok_or_else(|| TelemetryError::InterfaceOffline(name.to_string()))
}

/// First configured LAN interface with an IPv4 address
///
/// # Errors
///
/// Returns `InterfaceOffline` naming the last candidate when none is up
pub fn first_lan_ipv4(candidates: &[String]) -> Result<(String, Ipv4Addr), TelemetryError> {
    let interfaces = list_interfaces()?;
    find_first_ipv4(flatten(&interfaces), candidates).ok_or_else(|| {
        TelemetryError::InterfaceOffline(candidates.last().cloned().unwrap_or_default())
    })
}
