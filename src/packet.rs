//! Ethernet/IPv4/TCP frame construction for synthetic traffic.

use std::fmt::{self, Write as _};
use std::net::Ipv4Addr;

use pnet::packet::Packet;
use pnet::packet::ethernet::{EtherTypes, EthernetPacket, MutableEthernetPacket};
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::packet::ipv4::{self, Ipv4Packet, MutableIpv4Packet};
use pnet::packet::tcp::{self, MutableTcpPacket, TcpFlags, TcpPacket};
use pnet::util::MacAddr;
use rand::Rng;

use crate::error::TrafficError;

pub const ETHERNET_HEADER_LEN: usize = 14;
pub const IPV4_HEADER_LEN: usize = 20;
pub const TCP_HEADER_LEN: usize = 20;
/// Largest payload that keeps the frame within a 1500-byte Ethernet MTU.
pub const MAX_PAYLOAD_LEN: usize = 1500 - IPV4_HEADER_LEN - TCP_HEADER_LEN;

const IPV4_TTL: u8 = 64;
const IPV4_IDENTIFICATION: u16 = 1;
const TCP_SOURCE_PORT: u16 = 20;
const TCP_WINDOW: u16 = 8192;

/// One outgoing TCP segment, addressed at both link and network layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficPacket {
    pub src_mac: MacAddr,
    pub dst_mac: MacAddr,
    pub src_ip: Ipv4Addr,
    pub dst_ip: Ipv4Addr,
    pub dst_port: u16,
    pub payload: Vec<u8>,
}

impl TrafficPacket {
    pub fn frame_len(&self) -> usize {
        ETHERNET_HEADER_LEN + IPV4_HEADER_LEN + TCP_HEADER_LEN + self.payload.len()
    }

    /// Serialize into a complete Ethernet frame with valid IPv4 and TCP checksums.
    pub fn build_frame(&self) -> Result<Vec<u8>, TrafficError> {
        let total_len = u16::try_from(IPV4_HEADER_LEN + TCP_HEADER_LEN + self.payload.len())
            .map_err(|_| TrafficError::PayloadTooLarge(self.payload.len()))?;

        let mut buffer = vec![0u8; self.frame_len()];
        let ip_start = ETHERNET_HEADER_LEN;
        let tcp_start = ip_start + IPV4_HEADER_LEN;

        // Buffer sizes are computed above, so the pnet constructors cannot fail.
        if let Some(mut eth) = MutableEthernetPacket::new(&mut buffer[..ip_start]) {
            eth.set_destination(self.dst_mac);
            eth.set_source(self.src_mac);
            eth.set_ethertype(EtherTypes::Ipv4);
        }

        if let Some(mut ip) = MutableIpv4Packet::new(&mut buffer[ip_start..tcp_start]) {
            ip.set_version(4);
            ip.set_header_length(5);
            ip.set_total_length(total_len);
            ip.set_identification(IPV4_IDENTIFICATION);
            ip.set_ttl(IPV4_TTL);
            ip.set_next_level_protocol(IpNextHeaderProtocols::Tcp);
            ip.set_source(self.src_ip);
            ip.set_destination(self.dst_ip);
            let checksum = ipv4::checksum(&ip.to_immutable());
            ip.set_checksum(checksum);
        }

        if let Some(mut segment) = MutableTcpPacket::new(&mut buffer[tcp_start..]) {
            segment.set_source(TCP_SOURCE_PORT);
            segment.set_destination(self.dst_port);
            segment.set_sequence(0);
            segment.set_data_offset(5);
            segment.set_flags(TcpFlags::SYN);
            segment.set_window(TCP_WINDOW);
            segment.set_payload(&self.payload);
            let checksum = tcp::ipv4_checksum(&segment.to_immutable(), &self.src_ip, &self.dst_ip);
            segment.set_checksum(checksum);
        }

        Ok(buffer)
    }
}

/// Random lowercase ASCII payload of length `1..=max_len`.
pub fn random_payload<R: Rng + ?Sized>(rng: &mut R, max_len: usize) -> Vec<u8> {
    let len = rng.gen_range(1..=max_len);
    (0..len).map(|_| rng.gen_range(b'a'..=b'z')).collect()
}

/// Human-readable, layer-by-layer dump of an Ethernet/IPv4/TCP frame.
///
/// Returns `None` if the bytes do not parse down to a TCP segment.
pub fn describe_frame(frame: &[u8]) -> Option<String> {
    let eth = EthernetPacket::new(frame)?;
    if eth.get_ethertype() != EtherTypes::Ipv4 {
        return None;
    }
    let ip = Ipv4Packet::new(eth.payload())?;
    if ip.get_next_level_protocol() != IpNextHeaderProtocols::Tcp {
        return None;
    }
    let segment = TcpPacket::new(ip.payload())?;

    let mut out = String::new();
    render(&mut out, &eth, &ip, &segment).ok()?;
    Some(out)
}

fn render(
    out: &mut String,
    eth: &EthernetPacket<'_>,
    ip: &Ipv4Packet<'_>,
    segment: &TcpPacket<'_>,
) -> fmt::Result {
    writeln!(out, "###[ Ethernet ]###")?;
    writeln!(out, "  dst      = {}", eth.get_destination())?;
    writeln!(out, "  src      = {}", eth.get_source())?;
    writeln!(out, "  type     = 0x{:04x}", eth.get_ethertype().0)?;
    writeln!(out, "###[ IP ]###")?;
    writeln!(out, "  version  = {}", ip.get_version())?;
    writeln!(out, "  ihl      = {}", ip.get_header_length())?;
    writeln!(out, "  len      = {}", ip.get_total_length())?;
    writeln!(out, "  id       = {}", ip.get_identification())?;
    writeln!(out, "  ttl      = {}", ip.get_ttl())?;
    writeln!(out, "  proto    = {}", ip.get_next_level_protocol().0)?;
    writeln!(out, "  chksum   = 0x{:04x}", ip.get_checksum())?;
    writeln!(out, "  src      = {}", ip.get_source())?;
    writeln!(out, "  dst      = {}", ip.get_destination())?;
    writeln!(out, "###[ TCP ]###")?;
    writeln!(out, "  sport    = {}", segment.get_source())?;
    writeln!(out, "  dport    = {}", segment.get_destination())?;
    writeln!(out, "  seq      = {}", segment.get_sequence())?;
    writeln!(out, "  dataofs  = {}", segment.get_data_offset())?;
    writeln!(out, "  flags    = 0x{:02x}", segment.get_flags())?;
    writeln!(out, "  window   = {}", segment.get_window())?;
    writeln!(out, "  chksum   = 0x{:04x}", segment.get_checksum())?;
    writeln!(out, "###[ Raw ]###")?;
    writeln!(out, "  load     = '{}'", String::from_utf8_lossy(segment.payload()))?;
    Ok(())
}
