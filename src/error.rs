use std::io;

use thiserror::Error;

/// Failures on the traffic-sending path.
#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("Invalid host to send to: {0} (expected one of {known})", known = crate::destination::known_hosts().join(", "))]
    UnknownHost(String),

    #[error("No interface for output: {0}")]
    InterfaceNotFound(String),

    #[error("Interface {0} has no link-layer address")]
    NoMacAddress(String),

    #[error("Interface {0} did not open an Ethernet channel")]
    UnsupportedChannel(String),

    #[error("Failed to open datalink channel on {iface}")]
    Channel {
        iface: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to send frame to port {port}")]
    Send {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write packet dump")]
    Dump(#[source] io::Error),

    #[error("Payload of {0} bytes does not fit in an IPv4 packet")]
    PayloadTooLarge(usize),

    #[error("Invalid traffic profile: {0}")]
    InvalidProfile(String),
}
