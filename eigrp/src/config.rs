// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::metric::EigrpMetric;
use crate::neighbor::EigrpNeighborConfigId;
use crate::{DEFAULT_EXTERNAL_ADMIN_DISTANCE, DEFAULT_INTERNAL_ADMIN_DISTANCE};
use rib::Prefix4;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::Ipv4Addr;

/// A concrete interface address: the interface's own address plus the
/// connected network it implies.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
pub struct InterfaceAddress {
    pub address: Ipv4Addr,
    pub prefix_length: u8,
}

impl InterfaceAddress {
    pub fn new(address: Ipv4Addr, prefix_length: u8) -> Self {
        Self {
            address,
            prefix_length,
        }
    }

    /// The connected prefix this address lives in.
    pub fn prefix(&self) -> Prefix4 {
        Prefix4::new(self.address, self.prefix_length)
    }
}

/// Per-interface EIGRP configuration.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
pub struct EigrpInterfaceSettings {
    pub asn: u32,
    pub enabled: bool,
    pub metric: EigrpMetric,
}

/// One router interface as the routing process sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InterfaceConfig {
    pub vrf: String,
    pub addresses: Vec<InterfaceAddress>,
    pub active: bool,
    pub eigrp: Option<EigrpInterfaceSettings>,
}

/// Snapshot of one router's interface configuration, the input to
/// process initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RouterConfig {
    pub hostname: String,
    pub interfaces: BTreeMap<String, InterfaceConfig>,
}

impl RouterConfig {
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            interfaces: BTreeMap::new(),
        }
    }
}

/// Snapshot of every router's configuration, used during iteration to
/// resolve a neighbor-config id to its live interface and link metric.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
pub struct NetworkConfigurations {
    routers: BTreeMap<String, RouterConfig>,
}

impl NetworkConfigurations {
    pub fn new(routers: impl IntoIterator<Item = RouterConfig>) -> Self {
        Self {
            routers: routers
                .into_iter()
                .map(|r| (r.hostname.clone(), r))
                .collect(),
        }
    }

    pub fn router(&self, hostname: &str) -> Option<&RouterConfig> {
        self.routers.get(hostname)
    }

    pub fn interface(
        &self,
        id: &EigrpNeighborConfigId,
    ) -> Option<&InterfaceConfig> {
        self.routers.get(&id.hostname)?.interfaces.get(&id.interface)
    }

    /// The EIGRP settings for `id`, if the interface exists and is enabled
    /// for the id's ASN. A topology edge whose endpoint fails this lookup
    /// is a config/topology mismatch.
    pub fn eigrp_settings(
        &self,
        id: &EigrpNeighborConfigId,
    ) -> Option<&EigrpInterfaceSettings> {
        self.interface(id)?
            .eigrp
            .as_ref()
            .filter(|s| s.asn == id.asn && s.enabled)
    }
}

/// Per-process configuration. One process exists per (protocol, router,
/// VRF).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EigrpProcessConfig {
    pub asn: u32,
    pub vrf: String,
    pub internal_admin_distance: u8,
    pub external_admin_distance: u8,
}

impl EigrpProcessConfig {
    pub fn new(asn: u32, vrf: &str) -> Self {
        Self {
            asn,
            vrf: vrf.to_string(),
            internal_admin_distance: DEFAULT_INTERNAL_ADMIN_DISTANCE,
            external_admin_distance: DEFAULT_EXTERNAL_ADMIN_DISTANCE,
        }
    }
}
