//! Simulated network diagnostics
//!
//! None of these touch the network. They render the text a Windows
//! workstation would print for the corresponding command, keyed by the
//! session's connection type, so that a UAT report has diagnostics to
//! attach even where raw sockets are unavailable.

pub mod ping;
pub mod tracert;
pub mod website;

pub use ping::simulate_ping;
pub use tracert::{simulate_tracert_hop, TraceHop, Traceroute, TracerouteTimer, HOP_COUNT};
pub use website::{HttpChecker, SimulatedChecker, WebsiteCheck, WebsiteChecker};

use crate::session::ConnectionType;

const IPCONFIG_HEADER: &str = "Windows IP Configuration\n\n";

/// Render `ipconfig` output for the given connection type
///
/// Without a connection type only the header is produced.
pub fn simulate_ip_config(connection_type: Option<ConnectionType>) -> String {
    let adapter = match connection_type {
        Some(ConnectionType::Lan) => {
            "Ethernet adapter Ethernet0:\n\
             \x20  Connection-specific DNS Suffix  . : company.local\n\
             \x20  IPv4 Address. . . . . . . . . . . : 192.168.1.100\n\
             \x20  Subnet Mask . . . . . . . . . . . : 255.255.255.0\n\
             \x20  Default Gateway . . . . . . . . . : 192.168.1.1\n\n"
        }
        Some(ConnectionType::Wlan) => {
            "Wireless LAN adapter Wi-Fi:\n\
             \x20  Connection-specific DNS Suffix  . : company.local\n\
             \x20  IPv4 Address. . . . . . . . . . . : 192.168.1.101\n\
             \x20  Subnet Mask . . . . . . . . . . . : 255.255.255.0\n\
             \x20  Default Gateway . . . . . . . . . : 192.168.1.1\n\n"
        }
        Some(ConnectionType::Vpn) => {
            "PPP adapter VPN Connection:\n\
             \x20  Connection-specific DNS Suffix  . : \n\
             \x20  IPv4 Address. . . . . . . . . . . : 10.10.10.100\n\
             \x20  Subnet Mask . . . . . . . . . . . : 255.255.255.0\n\
             \x20  Default Gateway . . . . . . . . . : 10.10.10.1\n\n"
        }
        None => "",
    };

    format!("{IPCONFIG_HEADER}{adapter}")
}

/// Message returned when the session is not on a wireless connection
pub const NO_WIRELESS: &str = "No wireless interfaces detected.";

const WLAN_INTERFACE: &str = "Interfaces:
  Name                   : Wi-Fi
  Description            : Intel(R) Wireless-AC 9560 160MHz
  GUID                   : c13d08e7-4ec7-4def-9b9e-bc32bf2247c7
  Physical address       : 64:5d:86:8b:c7:f2
  State                  : connected
  SSID                   : ABB-Corp
  BSSID                  : 00:1a:2b:3c:4d:5e
  Network type           : Infrastructure
  Radio type             : 802.11ac
  Authentication         : WPA2-Enterprise
  Cipher                 : CCMP
  Connection mode        : Auto Connect
  Channel                : 36
  Receive rate (Mbps)    : 866.7
  Transmit rate (Mbps)   : 866.7
  Signal                 : 90%
  Profile                : ABB-Corp
";

/// Render `netsh wlan show interfaces` output
pub fn simulate_wlan_info(connection_type: Option<ConnectionType>) -> String {
    match connection_type {
        Some(ConnectionType::Wlan) => WLAN_INTERFACE.to_string(),
        _ => NO_WIRELESS.to_string(),
    }
}
