//! Synthetic TCP traffic for an SDN testbed.
//!
//! Resolves a logical destination host to its fixed addresses, then sends
//! batches of random-payload TCP frames to randomly chosen ports out of a
//! named host interface.

pub mod config;
pub mod destination;
pub mod egress;
pub mod emitter;
pub mod error;
pub mod packet;
pub mod topology;

pub use config::TrafficProfile;
pub use destination::Destination;
pub use egress::{Egress, FrameSink};
pub use emitter::{SendReport, Source, send_from_sources, send_traffic};
pub use error::TrafficError;
pub use topology::{Topology, TopologyError};
