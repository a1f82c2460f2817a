//! Random TCP traffic toward a single destination host.

use std::io::Write;
use std::net::Ipv4Addr;

use pnet::util::MacAddr;
use rand::Rng;
use rand::seq::index;
use tracing::{debug, info};

use crate::config::TrafficProfile;
use crate::destination::Destination;
use crate::egress::FrameSink;
use crate::error::TrafficError;
use crate::packet::{TrafficPacket, describe_frame, random_payload};

/// Local end of the traffic: our interface MAC and the source IP to claim.
#[derive(Debug, Clone, Copy)]
pub struct Source {
    pub mac: MacAddr,
    pub ip: Ipv4Addr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortBatch {
    pub port: u16,
    pub packets: usize,
}

/// What one run put on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReport {
    pub batches: Vec<PortBatch>,
    pub total_packets: usize,
    pub total_bytes: usize,
}

/// Pick `profile.port_count` distinct ports uniformly from `profile.port_range`.
pub fn choose_ports<R: Rng + ?Sized>(rng: &mut R, profile: &TrafficProfile) -> Vec<u16> {
    let base = profile.port_range.start;
    index::sample(rng, profile.port_range.len(), profile.port_count)
        .into_iter()
        .map(|offset| base + offset as u16)
        .collect()
}

/// Send one run of random traffic and write a dump of every frame to `dump`.
///
/// A `None` dump skips rendering entirely.
pub fn send_traffic<S, R, W>(
    sink: &mut S,
    rng: &mut R,
    profile: &TrafficProfile,
    source: Source,
    destination: Destination,
    mut dump: Option<&mut W>,
) -> Result<SendReport, TrafficError>
where
    S: FrameSink + ?Sized,
    R: Rng + ?Sized,
    W: Write + ?Sized,
{
    profile.validate()?;

    info!(
        "Sending from {} to {} on {} ports",
        source.ip, destination, profile.port_count
    );

    let mut report = SendReport::default();
    for port in choose_ports(rng, profile) {
        let packets = rng.gen_range(profile.packets_per_port.clone());
        debug!("Port {}: {} packets", port, packets);

        for _ in 0..packets {
            let packet = TrafficPacket {
                src_mac: source.mac,
                dst_mac: destination.mac,
                src_ip: source.ip,
                dst_ip: destination.ip,
                dst_port: port,
                payload: random_payload(rng, profile.max_payload_len),
            };
            let frame = packet.build_frame()?;

            if let Some(out) = dump.as_deref_mut() {
                if let Some(text) = describe_frame(&frame) {
                    out.write_all(text.as_bytes()).map_err(TrafficError::Dump)?;
                }
            }

            sink.send_frame(&frame)
                .map_err(|err| TrafficError::Send { port, source: err })?;

            report.total_packets += 1;
            report.total_bytes += frame.len();
        }

        report.batches.push(PortBatch { port, packets });
    }

    info!(
        "Sent {} packets ({} bytes) from {}",
        report.total_packets, report.total_bytes, source.ip
    );
    Ok(report)
}

/// One [`send_traffic`] run per source, in order.
///
/// Each run is followed by a `Sent <N> packets in total` line on `out`.
/// Packet dumps go to `out` too unless `quiet` is set.
pub fn send_from_sources<S, R, W>(
    sink: &mut S,
    rng: &mut R,
    profile: &TrafficProfile,
    sources: &[Source],
    destination: Destination,
    out: &mut W,
    quiet: bool,
) -> Result<Vec<SendReport>, TrafficError>
where
    S: FrameSink + ?Sized,
    R: Rng + ?Sized,
    W: Write + ?Sized,
{
    let mut reports = Vec::with_capacity(sources.len());
    for &source in sources {
        let dump = if quiet { None } else { Some(&mut *out) };
        let report = send_traffic(sink, rng, profile, source, destination, dump)?;

        writeln!(out, "Sent {} packets in total", report.total_packets)
            .map_err(TrafficError::Dump)?;
        reports.push(report);
    }
    Ok(reports)
}
