// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The EIGRP route model. Routes are immutable value types: a route with a
//! new metric or next hop is a new value, never an in-place mutation.

use crate::metric::EigrpMetric;
use rib::{Prefix4, RibRoute};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// A route internal to the process ASN. `next_hop` is `None` for locally
/// originated (connected) routes and the advertising neighbor's interface
/// address after the first hop.
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
pub struct EigrpInternalRoute {
    pub network: Prefix4,
    pub metric: EigrpMetric,
    pub admin_distance: u8,
    pub process_asn: u32,
    pub next_hop: Option<Ipv4Addr>,
}

/// A route redistributed into EIGRP from elsewhere. `destination_asn` is
/// the autonomous system the route originated in and is preserved across
/// re-advertisement. `non_routing` marks routes synthesized by the
/// redistribution bridge: they are advertised but never installed in the
/// owning router's forwarding table.
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
pub struct EigrpExternalRoute {
    pub network: Prefix4,
    pub metric: EigrpMetric,
    pub admin_distance: u8,
    pub process_asn: u32,
    pub destination_asn: u32,
    pub next_hop: Option<Ipv4Addr>,
    pub non_routing: bool,
}

/// Internal or external EIGRP route, dispatched by match.
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
pub enum EigrpRoute {
    Internal(EigrpInternalRoute),
    External(EigrpExternalRoute),
}

impl EigrpRoute {
    pub fn metric(&self) -> &EigrpMetric {
        match self {
            EigrpRoute::Internal(r) => &r.metric,
            EigrpRoute::External(r) => &r.metric,
        }
    }

    pub fn is_non_routing(&self) -> bool {
        match self {
            EigrpRoute::Internal(_) => false,
            EigrpRoute::External(r) => r.non_routing,
        }
    }
}

impl From<EigrpInternalRoute> for EigrpRoute {
    fn from(value: EigrpInternalRoute) -> Self {
        Self::Internal(value)
    }
}

impl From<EigrpExternalRoute> for EigrpRoute {
    fn from(value: EigrpExternalRoute) -> Self {
        Self::External(value)
    }
}

impl RibRoute for EigrpInternalRoute {
    fn network(&self) -> Prefix4 {
        self.network
    }
    fn admin_distance(&self) -> u8 {
        self.admin_distance
    }
    fn cost(&self) -> u64 {
        self.metric.cost()
    }
}

impl RibRoute for EigrpExternalRoute {
    fn network(&self) -> Prefix4 {
        self.network
    }
    fn admin_distance(&self) -> u8 {
        self.admin_distance
    }
    fn cost(&self) -> u64 {
        self.metric.cost()
    }
}

impl RibRoute for EigrpRoute {
    fn network(&self) -> Prefix4 {
        match self {
            EigrpRoute::Internal(r) => r.network,
            EigrpRoute::External(r) => r.network,
        }
    }
    fn admin_distance(&self) -> u8 {
        match self {
            EigrpRoute::Internal(r) => r.admin_distance,
            EigrpRoute::External(r) => r.admin_distance,
        }
    }
    fn cost(&self) -> u64 {
        self.metric().cost()
    }
}

/// The protocol a main-RIB route was learned from, for routes that are not
/// EIGRP's own.
#[derive(
    Debug,
    Copy,
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
pub enum SourceProtocol {
    Connected,
    Static,
    Bgp,
    Ospf,
}

/// A route as it appears in the router's main forwarding table, the input
/// to redistribution. EIGRP's own routes keep their full shape so the
/// bridge can carry metric and originating AS over; anything else is
/// reduced to its network and source protocol.
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
pub enum MainRibRoute {
    Eigrp(EigrpRoute),
    Other {
        network: Prefix4,
        protocol: SourceProtocol,
    },
}

impl MainRibRoute {
    pub fn network(&self) -> Prefix4 {
        match self {
            MainRibRoute::Eigrp(r) => r.network(),
            MainRibRoute::Other { network, .. } => *network,
        }
    }
}
