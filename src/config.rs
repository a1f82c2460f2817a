use std::ops::{Range, RangeInclusive};

use crate::error::TrafficError;
use crate::packet::MAX_PAYLOAD_LEN;

pub const DEFAULT_INTERFACE: &str = "h1-eth0";
pub const DEFAULT_TOPOLOGY_PATH: &str = "topo.txt";
pub const DEFAULT_SOURCES: [&str; 3] = ["20.0.0.1", "20.0.0.2", "20.0.0.3"];

/// Sampling parameters for one emitter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficProfile {
    /// Number of distinct destination ports per run.
    pub port_count: usize,
    /// Ephemeral range the ports are drawn from (end exclusive).
    pub port_range: Range<u16>,
    pub packets_per_port: RangeInclusive<usize>,
    pub max_payload_len: usize,
}

impl Default for TrafficProfile {
    fn default() -> Self {
        Self {
            port_count: 5,
            port_range: 1024..65535,
            packets_per_port: 10..=15,
            max_payload_len: 100,
        }
    }
}

impl TrafficProfile {
    pub fn validate(&self) -> Result<(), TrafficError> {
        if self.port_range.is_empty() {
            return Err(TrafficError::InvalidProfile(format!(
                "port range {:?} is empty",
                self.port_range
            )));
        }

        let available = self.port_range.len();
        if self.port_count == 0 || self.port_count > available {
            return Err(TrafficError::InvalidProfile(format!(
                "cannot pick {} distinct ports from {} available",
                self.port_count, available
            )));
        }

        if self.packets_per_port.is_empty() {
            return Err(TrafficError::InvalidProfile(format!(
                "packets per port range {:?} is empty",
                self.packets_per_port
            )));
        }

        if self.max_payload_len == 0 {
            return Err(TrafficError::InvalidProfile(
                "max payload length must be at least 1".to_string(),
            ));
        }

        if self.max_payload_len > MAX_PAYLOAD_LEN {
            return Err(TrafficError::InvalidProfile(format!(
                "max payload length {} exceeds the {} bytes one Ethernet frame carries",
                self.max_payload_len, MAX_PAYLOAD_LEN
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_valid() {
        let profile = TrafficProfile::default();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.port_range.len(), 64511);
    }

    #[test]
    fn port_count_cannot_exceed_range() {
        let profile = TrafficProfile {
            port_count: 4,
            port_range: 2000..2003,
            ..TrafficProfile::default()
        };
        assert!(matches!(profile.validate(), Err(TrafficError::InvalidProfile(_))));

        let exact = TrafficProfile {
            port_count: 3,
            ..profile
        };
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_ranges() {
        let inverted = TrafficProfile {
            packets_per_port: 15..=10,
            ..TrafficProfile::default()
        };
        assert!(inverted.validate().is_err());

        let empty_ports = TrafficProfile {
            port_range: 3000..3000,
            ..TrafficProfile::default()
        };
        assert!(empty_ports.validate().is_err());

        let no_payload = TrafficProfile {
            max_payload_len: 0,
            ..TrafficProfile::default()
        };
        assert!(no_payload.validate().is_err());
    }

    #[test]
    fn payload_limit_is_one_ethernet_mtu() {
        let at_limit = TrafficProfile {
            max_payload_len: MAX_PAYLOAD_LEN,
            ..TrafficProfile::default()
        };
        assert!(at_limit.validate().is_ok());

        for len in [MAX_PAYLOAD_LEN + 1, 70_000] {
            let oversized = TrafficProfile {
                max_payload_len: len,
                ..TrafficProfile::default()
            };
            assert!(matches!(oversized.validate(), Err(TrafficError::InvalidProfile(_))));
        }
    }
}
