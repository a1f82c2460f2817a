use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, Write};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sdn_traffic_gen::config::{DEFAULT_INTERFACE, DEFAULT_SOURCES, DEFAULT_TOPOLOGY_PATH};
use sdn_traffic_gen::{Egress, Source, Topology, TrafficProfile, destination, send_from_sources};

#[derive(Parser, Debug)]
#[command(name = "sdn-traffic-gen")]
#[command(about = "Send random TCP traffic to a host of the SDN testbed")]
#[command(version)]
struct Args {
    /// Logical destination host (h1, h2 or h3)
    dst_host: String,

    /// Interface to send from
    #[arg(short, long, default_value = DEFAULT_INTERFACE)]
    iface: String,

    /// Source IP addresses; one run of traffic is sent per address
    #[arg(short, long = "src", value_delimiter = ',', default_values = DEFAULT_SOURCES)]
    sources: Vec<Ipv4Addr>,

    /// Parse and log the testbed topology before sending
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_TOPOLOGY_PATH)]
    topo: Option<PathBuf>,

    /// Distinct destination ports per run
    #[arg(long, default_value = "5")]
    ports: usize,

    /// Minimum packets sent to each port
    #[arg(long, default_value = "10")]
    min_packets: usize,

    /// Maximum packets sent to each port
    #[arg(long, default_value = "15")]
    max_packets: usize,

    /// Maximum payload length in bytes
    #[arg(long, default_value = "100")]
    max_payload: usize,

    /// Seed for the random generator (default: OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Do not print a dump of every packet
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn profile(&self) -> TrafficProfile {
        TrafficProfile {
            port_count: self.ports,
            packets_per_port: self.min_packets..=self.max_packets,
            max_payload_len: self.max_payload,
            ..TrafficProfile::default()
        }
    }
}

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    // Logs go to stderr; stdout carries the packet dumps
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    run(args)
}

fn run(args: Args) -> Result<()> {
    let destination = destination::resolve(&args.dst_host)?;
    info!("Destination {} is {}", args.dst_host, destination);

    if let Some(path) = &args.topo {
        let topo = Topology::from_path(path)
            .with_context(|| format!("Failed to parse topology {}", path.display()))?;
        info!(
            "Topology: {} switches, {} hosts, {} links",
            topo.nb_switches,
            topo.nb_hosts,
            topo.links.len()
        );
        for (a, b) in &topo.links {
            debug!("  link {} <-> {}", a, b);
        }
    }

    let profile = args.profile();
    profile.validate()?;

    let mut egress = Egress::open(&args.iface)?;

    let mut rng = match args.seed {
        Some(seed) => {
            info!("Using RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let sources: Vec<Source> = args
        .sources
        .iter()
        .map(|&ip| Source {
            mac: egress.mac(),
            ip,
        })
        .collect();

    send_from_sources(
        &mut egress,
        &mut rng,
        &profile,
        &sources,
        destination,
        &mut out,
        args.quiet,
    )
    .context("Traffic run failed")?;

    out.flush()?;
    Ok(())
}
