//! Outgoing interface resolution and raw link-layer transmission.

use std::io;

use pnet::datalink::{self, Channel, DataLinkSender, NetworkInterface};
use pnet::util::MacAddr;
use tracing::{debug, info};

use crate::error::TrafficError;

/// Anything that can put a complete Ethernet frame on the wire.
pub trait FrameSink {
    fn send_frame(&mut self, frame: &[u8]) -> io::Result<()>;
}

pub fn find_interface<'a>(
    interfaces: &'a [NetworkInterface],
    name: &str,
) -> Option<&'a NetworkInterface> {
    interfaces.iter().find(|iface| iface.name == name)
}

/// Ethernet channel bound to the resolved outgoing interface.
pub struct Egress {
    name: String,
    mac: MacAddr,
    tx: Box<dyn DataLinkSender>,
}

impl Egress {
    /// Enumerate host interfaces and open a raw channel on the one called `name`.
    pub fn open(name: &str) -> Result<Self, TrafficError> {
        let interfaces = datalink::interfaces();
        debug!(
            "Available interfaces: {:?}",
            interfaces.iter().map(|i| i.name.as_str()).collect::<Vec<_>>()
        );

        let iface = find_interface(&interfaces, name)
            .ok_or_else(|| TrafficError::InterfaceNotFound(name.to_string()))?;

        let channel = datalink::channel(iface, Default::default()).map_err(|source| {
            TrafficError::Channel {
                iface: name.to_string(),
                source,
            }
        })?;

        Self::from_channel(iface, channel)
    }

    pub fn from_channel(iface: &NetworkInterface, channel: Channel) -> Result<Self, TrafficError> {
        let mac = iface
            .mac
            .ok_or_else(|| TrafficError::NoMacAddress(iface.name.clone()))?;

        let tx = match channel {
            Channel::Ethernet(tx, _rx) => tx,
            _ => return Err(TrafficError::UnsupportedChannel(iface.name.clone())),
        };

        info!("Sending on interface {} ({})", iface.name, mac);
        Ok(Self {
            name: iface.name.clone(),
            mac,
            tx,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mac(&self) -> MacAddr {
        self.mac
    }
}

impl FrameSink for Egress {
    fn send_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        match self.tx.send_to(frame, None) {
            Some(result) => result,
            None => Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("{}: frame too large for send buffer", self.name),
            )),
        }
    }
}
