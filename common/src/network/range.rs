//! # Network Ranges
//!
//! Parsing of CIDR blocks and enumeration of the host addresses they contain.
//!
//! Parsing is deliberately **non-strict**: an address with bits set outside the
//! prefix (e.g. `192.168.1.5/24`) is accepted and normalized to its containing
//! network (`192.168.1.0/24`). This tolerates operator typos instead of
//! rejecting them, so callers that need to show what is actually scanned should
//! display [`CidrSpec`] rather than the raw input.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use pnet::ipnetwork::IpNetwork;

use crate::error::ScanError;

const IPV4_BITS: u8 = 32;
const IPV6_BITS: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Family {
    V4,
    V6,
}

impl Family {
    fn bits(self) -> u8 {
        match self {
            Family::V4 => IPV4_BITS,
            Family::V6 => IPV6_BITS,
        }
    }

    fn to_addr(self, raw: u128) -> IpAddr {
        match self {
            Family::V4 => IpAddr::V4(Ipv4Addr::from(raw as u32)),
            Family::V6 => IpAddr::V6(Ipv6Addr::from(raw)),
        }
    }
}

/// A validated network: base address plus prefix length, host bits cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrSpec {
    family: Family,
    base: u128,
    prefix: u8,
}

impl CidrSpec {
    /// Parses an IPv4 or IPv6 network in CIDR notation.
    ///
    /// A bare address is treated as a single-host network (`/32` or `/128`),
    /// and a dotted netmask is accepted in place of a prefix length.
    pub fn parse(raw: &str) -> Result<Self, ScanError> {
        let network: IpNetwork = raw
            .parse()
            .map_err(|e| ScanError::invalid_network(raw, e))?;

        let (family, addr) = match network.ip() {
            IpAddr::V4(v4) => (Family::V4, u128::from(u32::from(v4))),
            IpAddr::V6(v6) => (Family::V6, u128::from(v6)),
        };
        let prefix = network.prefix();

        let mut spec = Self {
            family,
            base: 0,
            prefix,
        };
        spec.base = addr & !spec.host_mask();
        Ok(spec)
    }

    pub fn network(&self) -> IpAddr {
        self.family.to_addr(self.base)
    }

    /// The all-ones address of the network.
    pub fn broadcast(&self) -> IpAddr {
        self.family.to_addr(self.last())
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn is_ipv4(&self) -> bool {
        self.family == Family::V4
    }

    pub fn host_bits(&self) -> u8 {
        self.family.bits() - self.prefix
    }

    pub fn contains(&self, addr: IpAddr) -> bool {
        let raw = match (self.family, addr) {
            (Family::V4, IpAddr::V4(v4)) => u128::from(u32::from(v4)),
            (Family::V6, IpAddr::V6(v6)) => u128::from(v6),
            _ => return false,
        };
        raw & !self.host_mask() == self.base
    }

    /// Usable host addresses in ascending order.
    ///
    /// The network and all-ones addresses are skipped, except on point-to-point
    /// networks (`/31`, `/127`) where both addresses are hosts. Single-address
    /// networks yield nothing.
    pub fn hosts(&self) -> HostAddresses {
        match self.host_bits() {
            0 => HostAddresses::empty(self.family),
            1 => HostAddresses::new(self.family, self.base, self.last()),
            _ => HostAddresses::new(self.family, self.base + 1, self.last() - 1),
        }
    }

    fn host_mask(&self) -> u128 {
        match self.host_bits() {
            0 => 0,
            bits if bits >= IPV6_BITS => u128::MAX,
            bits => (1u128 << bits) - 1,
        }
    }

    fn last(&self) -> u128 {
        self.base | self.host_mask()
    }
}

impl FromStr for CidrSpec {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CidrSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix)
    }
}

/// Lazy, ascending iterator over the host addresses of a [`CidrSpec`].
///
/// Nothing is materialized, so even an IPv6 `/64` can be walked without
/// allocating the whole range up front.
#[derive(Debug, Clone)]
pub struct HostAddresses {
    family: Family,
    front: u128,
    back: u128,
    done: bool,
}

impl HostAddresses {
    fn new(family: Family, front: u128, back: u128) -> Self {
        Self {
            family,
            front,
            back,
            done: front > back,
        }
    }

    fn empty(family: Family) -> Self {
        Self {
            family,
            front: 0,
            back: 0,
            done: true,
        }
    }

    /// Number of addresses still to be yielded.
    ///
    /// Saturates at `u128::MAX` for an IPv6 `/0`.
    pub fn remaining(&self) -> u128 {
        if self.done {
            0
        } else {
            (self.back - self.front).saturating_add(1)
        }
    }
}

impl Iterator for HostAddresses {
    type Item = IpAddr;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.front;
        if self.front == self.back {
            self.done = true;
        } else {
            self.front += 1;
        }

        Some(self.family.to_addr(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
