//! Reader for the flat `topo.txt` testbed description.
//!
//! ```text
//! switches 2
//! hosts 3
//! h1 s1
//! h2 s1
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("Failed to read topology")]
    Io(#[from] io::Error),

    #[error("Topology is missing the `{0}` header line")]
    MissingHeader(&'static str),

    #[error("Line {line}: expected `{expected} <count>`, found {found:?}")]
    UnexpectedHeader {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("Line {line}: invalid {field} count {value:?}")]
    InvalidCount {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: expected two link endpoints, found {found:?}")]
    MalformedLink { line: usize, found: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub nb_switches: usize,
    pub nb_hosts: usize,
    /// Links in file order.
    pub links: Vec<(String, String)>,
}

impl Topology {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        debug!("Reading topology from {}", path.display());
        let file = File::open(path)?;
        parse(BufReader::new(file))
    }
}

pub fn parse<R: BufRead>(reader: R) -> Result<Topology, TopologyError> {
    let mut lines = reader.lines().enumerate();

    let nb_switches = header(&mut lines, "switches")?;
    let nb_hosts = header(&mut lines, "hosts")?;

    let mut links = Vec::new();
    for (idx, line) in lines {
        let line = line?;
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(a), Some(b), None) => links.push((a.to_string(), b.to_string())),
            _ => {
                return Err(TopologyError::MalformedLink {
                    line: idx + 1,
                    found: line,
                });
            }
        }
    }

    debug!(
        "Parsed topology: {} switches, {} hosts, {} links",
        nb_switches,
        nb_hosts,
        links.len()
    );

    Ok(Topology {
        nb_switches,
        nb_hosts,
        links,
    })
}

fn header<I>(lines: &mut I, expected: &'static str) -> Result<usize, TopologyError>
where
    I: Iterator<Item = (usize, io::Result<String>)>,
{
    let (idx, line) = lines.next().ok_or(TopologyError::MissingHeader(expected))?;
    let line = line?;
    let mut tokens = line.split_whitespace();

    let value = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(word), Some(value), None) if word == expected => value,
        _ => {
            return Err(TopologyError::UnexpectedHeader {
                line: idx + 1,
                expected,
                found: line,
            });
        }
    };

    value.parse().map_err(|_| TopologyError::InvalidCount {
        line: idx + 1,
        field: expected,
        value: value.to_string(),
    })
}
