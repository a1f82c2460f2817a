//! Fixed table of testbed destination hosts.

use std::fmt;
use std::net::Ipv4Addr;

use pnet::util::MacAddr;

use crate::error::TrafficError;

/// Link-layer and network address of a destination host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub mac: MacAddr,
    pub ip: Ipv4Addr,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.ip, self.mac)
    }
}

const DESTINATIONS: &[(&str, Destination)] = &[
    (
        "h1",
        Destination {
            mac: MacAddr(0x00, 0x04, 0x00, 0x00, 0x00, 0x00),
            ip: Ipv4Addr::new(10, 0, 0, 10),
        },
    ),
    (
        "h2",
        Destination {
            mac: MacAddr(0x00, 0x04, 0x00, 0x00, 0x00, 0x01),
            ip: Ipv4Addr::new(10, 0, 1, 10),
        },
    ),
    (
        "h3",
        Destination {
            mac: MacAddr(0x00, 0x04, 0x00, 0x00, 0x00, 0x02),
            ip: Ipv4Addr::new(10, 0, 2, 10),
        },
    ),
];

/// Look up a logical host name such as `h2`.
pub fn resolve(name: &str) -> Result<Destination, TrafficError> {
    DESTINATIONS
        .iter()
        .find(|(host, _)| *host == name)
        .map(|(_, dst)| *dst)
        .ok_or_else(|| TrafficError::UnknownHost(name.to_string()))
}

/// Host names accepted by [`resolve`], in table order.
pub fn known_hosts() -> Vec<&'static str> {
    DESTINATIONS.iter().map(|(host, _)| *host).collect()
}
