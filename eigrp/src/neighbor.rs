// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

/// Identifies one EIGRP-enabled interface on one router: the endpoints of
/// the adjacency graph.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct EigrpNeighborConfigId {
    pub asn: u32,
    pub hostname: String,
    pub interface: String,
}

// Basic ordering so edge maps iterate the same way in every run
impl PartialOrd for EigrpNeighborConfigId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for EigrpNeighborConfigId {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.hostname != other.hostname {
            return self.hostname.cmp(&other.hostname);
        }
        if self.interface != other.interface {
            return self.interface.cmp(&other.interface);
        }
        self.asn.cmp(&other.asn)
    }
}

impl EigrpNeighborConfigId {
    pub fn new(asn: u32, hostname: &str, interface: &str) -> Self {
        Self {
            asn,
            hostname: hostname.to_string(),
            interface: interface.to_string(),
        }
    }
}

impl Display for EigrpNeighborConfigId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}[asn={}]", self.hostname, self.interface, self.asn)
    }
}

/// One directed neighbor relationship: messages flow from `tail` to
/// `head`. An edge in a process's incoming map always has that process's
/// own interface as `head`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub struct EigrpEdge {
    pub tail: EigrpNeighborConfigId,
    pub head: EigrpNeighborConfigId,
}

impl EigrpEdge {
    pub fn new(tail: EigrpNeighborConfigId, head: EigrpNeighborConfigId) -> Self {
        Self { tail, head }
    }

    /// The same adjacency seen from the other side.
    pub fn reverse(&self) -> EigrpEdge {
        EigrpEdge {
            tail: self.head.clone(),
            head: self.tail.clone(),
        }
    }
}

impl Display for EigrpEdge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.tail, self.head)
    }
}

#[cfg(test)]
mod test {
    use super::{EigrpEdge, EigrpNeighborConfigId};

    #[test]
    fn reverse_is_involutive() {
        let edge = EigrpEdge::new(
            EigrpNeighborConfigId::new(1, "r1", "eth0"),
            EigrpNeighborConfigId::new(1, "r2", "eth0"),
        );
        assert_eq!(edge.reverse().reverse(), edge);
        assert_ne!(edge.reverse(), edge);
    }
}
