// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The EIGRP routing process. One instance exists per (router, VRF, ASN)
//! and is driven by the orchestrator through the [`RoutingProcess`]
//! lifecycle: initialize once, then rounds of `update_topology`,
//! `execute_iteration`, `get_updates_for_main_rib` and `redistribute`
//! until no process in the network is dirty.

use crate::config::{
    EigrpProcessConfig, NetworkConfigurations, RouterConfig,
};
use crate::error::Error;
use crate::log::process_log;
use crate::mailbox::Mailbox;
use crate::neighbor::{EigrpEdge, EigrpNeighborConfigId};
use crate::policy::{
    Direction, EigrpExportPolicy, ExportAttributes, PolicyResult,
};
use crate::route::{
    EigrpExternalRoute, EigrpInternalRoute, EigrpRoute, MainRibRoute,
};
use crate::switchboard::Switchboard;
use crate::topology::EigrpTopology;
use rib::{Prefix4, Rib, RibDelta, RouteAdvertisement};
use slog::Logger;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

/// The lifecycle contract between the orchestrator and a routing process.
/// Every protocol in the engine follows this pattern; EIGRP is the first.
pub trait RoutingProcess {
    type Topology;
    type Route: rib::RibRoute;

    /// One-time local route seeding from the router's own configuration.
    /// No messages are sent.
    fn initialize(&mut self, config: &RouterConfig);

    /// Atomically rebuild the incoming queue maps for a new topology
    /// snapshot.
    fn update_topology(&mut self, topology: &Self::Topology);

    /// Run exactly one round: drain queues, settle RIBs, deliver deltas
    /// into neighbors' queues.
    fn execute_iteration(
        &mut self,
        nc: &NetworkConfigurations,
    ) -> Result<(), Error>;

    /// This round's contribution to the router's main RIB. Idempotent
    /// until the next `execute_iteration`.
    fn get_updates_for_main_rib(&self) -> RibDelta<Self::Route>;

    /// Queue main-RIB changes for redistribution in the next round.
    /// Nothing is sent immediately.
    fn redistribute(&mut self, main_rib_delta: &RibDelta<MainRibRoute>);

    /// True while this process still has unconsumed work anywhere: queued
    /// messages or unflushed deltas.
    fn is_dirty(&self) -> bool;

    /// Deterministic digest of RIB and queue state. The orchestrator
    /// compares hashes across rounds to detect oscillation instead of
    /// looping forever.
    fn iteration_hash(&self) -> u64;
}

type IncomingQueues<R> = BTreeMap<EigrpEdge, Mailbox<RouteAdvertisement<R>>>;

pub struct EigrpRoutingProcess {
    config: EigrpProcessConfig,

    /// Local endpoints registered at initialization. Queue rebuilds are
    /// scoped to these.
    interfaces: Vec<EigrpNeighborConfigId>,

    /// Paths internal to this process's ASN.
    internal_rib: Rib<EigrpInternalRoute>,

    /// Redistributed paths.
    external_rib: Rib<EigrpExternalRoute>,

    /// Internal and external paths combined under their respective admin
    /// distances; the source of the main-RIB contribution.
    rib: Rib<EigrpRoute>,

    export_policy: Option<Box<dyn EigrpExportPolicy>>,

    incoming_internal: IncomingQueues<EigrpInternalRoute>,
    incoming_external: IncomingQueues<EigrpExternalRoute>,

    /// Locally originated routes not yet announced to neighbors.
    initialization_delta: RibDelta<EigrpInternalRoute>,

    /// External routes produced by the last `redistribute` call, flushed
    /// at the start of the next round's external phase.
    queued_for_redistribution: RibDelta<EigrpExternalRoute>,

    /// The changes this round contributes to the main RIB.
    change_set: RibDelta<EigrpRoute>,

    switchboard: Switchboard,
    log: Logger,
}

impl EigrpRoutingProcess {
    pub fn new(
        config: EigrpProcessConfig,
        export_policy: Option<Box<dyn EigrpExportPolicy>>,
        switchboard: Switchboard,
        log: Logger,
    ) -> Self {
        Self {
            config,
            interfaces: Vec::new(),
            internal_rib: Rib::new(),
            external_rib: Rib::new(),
            rib: Rib::new(),
            export_policy,
            incoming_internal: BTreeMap::new(),
            incoming_external: BTreeMap::new(),
            initialization_delta: RibDelta::default(),
            queued_for_redistribution: RibDelta::default(),
            change_set: RibDelta::default(),
            switchboard,
            log,
        }
    }

    pub fn asn(&self) -> u32 {
        self.config.asn
    }

    pub fn vrf(&self) -> &str {
        &self.config.vrf
    }

    pub fn internal_rib(&self) -> &Rib<EigrpInternalRoute> {
        &self.internal_rib
    }

    pub fn external_rib(&self) -> &Rib<EigrpExternalRoute> {
        &self.external_rib
    }

    pub fn rib(&self) -> &Rib<EigrpRoute> {
        &self.rib
    }

    /// Append internal-route advertisements to the queue for `edge`.
    /// The edge must be live in the current topology.
    pub fn enqueue_internal_messages(
        &self,
        edge: &EigrpEdge,
        messages: impl IntoIterator<Item = RouteAdvertisement<EigrpInternalRoute>>,
    ) -> Result<(), Error> {
        let queue = self
            .incoming_internal
            .get(edge)
            .ok_or_else(|| Error::UnregisteredEdge(edge.clone()))?;
        queue.sender().send_all(messages);
        Ok(())
    }

    /// Append external-route advertisements to the queue for `edge`.
    pub fn enqueue_external_messages(
        &self,
        edge: &EigrpEdge,
        messages: impl IntoIterator<Item = RouteAdvertisement<EigrpExternalRoute>>,
    ) -> Result<(), Error> {
        let queue = self
            .incoming_external
            .get(edge)
            .ok_or_else(|| Error::UnregisteredEdge(edge.clone()))?;
        queue.sender().send_all(messages);
        Ok(())
    }

    /// Seed internal routes from connected prefixes: one route per
    /// distinct prefix on each active, EIGRP-enabled interface matching
    /// this process's ASN and VRF.
    fn init_internal_routes(
        &mut self,
        config: &RouterConfig,
    ) -> RibDelta<EigrpInternalRoute> {
        let mut delta = RibDelta::default();
        for (name, iface) in &config.interfaces {
            if iface.vrf != self.config.vrf || !iface.active {
                continue;
            }
            let Some(eigrp) = iface.eigrp.as_ref() else {
                continue;
            };
            if eigrp.asn != self.config.asn || !eigrp.enabled {
                continue;
            }
            self.interfaces.push(EigrpNeighborConfigId::new(
                eigrp.asn,
                &config.hostname,
                name,
            ));
            let prefixes: BTreeSet<Prefix4> =
                iface.addresses.iter().map(|a| a.prefix()).collect();
            for network in prefixes {
                let route = EigrpInternalRoute {
                    network,
                    metric: eigrp.metric,
                    admin_distance: self.config.internal_admin_distance,
                    process_asn: self.config.asn,
                    next_hop: None,
                };
                delta.extend(self.internal_rib.merge_route_get_delta(route));
            }
        }
        delta
    }

    /// Drain every internal queue, folding the link metric into each
    /// received route and applying it against the internal RIB in arrival
    /// order.
    fn process_internal_routes(
        &mut self,
        nc: &NetworkConfigurations,
    ) -> RibDelta<EigrpInternalRoute> {
        let mut delta = RibDelta::default();
        for (edge, queue) in &self.incoming_internal {
            let (Some(link), Some(neighbor_iface)) =
                (nc.eigrp_settings(&edge.head), nc.interface(&edge.tail))
            else {
                // config/topology mismatch on this edge: skip its
                // contribution for the round rather than aborting
                let dropped = queue.drain().len();
                process_log!(
                    self,
                    warn,
                    "edge {} lacks eigrp configuration, dropped {} messages",
                    edge,
                    dropped
                );
                continue;
            };
            let Some(next_hop) =
                neighbor_iface.addresses.first().map(|a| a.address)
            else {
                let dropped = queue.drain().len();
                process_log!(
                    self,
                    warn,
                    "neighbor {} has no address, dropped {} messages",
                    edge.tail,
                    dropped
                );
                continue;
            };
            for advert in queue.drain() {
                let metric = link.metric.accumulate(&advert.route.metric);
                let route = EigrpInternalRoute {
                    network: advert.route.network,
                    metric,
                    admin_distance: self.config.internal_admin_distance,
                    process_asn: self.config.asn,
                    next_hop: Some(next_hop),
                };
                if advert.withdrawn {
                    delta.extend(
                        self.internal_rib.remove_route_get_delta(route),
                    );
                } else {
                    delta.extend(
                        self.internal_rib.merge_route_get_delta(route),
                    );
                }
            }
        }
        delta
    }

    /// Drain every external queue analogously, preserving the originating
    /// AS carried in each advertisement.
    fn process_external_routes(
        &mut self,
        nc: &NetworkConfigurations,
    ) -> RibDelta<EigrpExternalRoute> {
        let mut delta = RibDelta::default();
        for (edge, queue) in &self.incoming_external {
            // both endpoints must carry EIGRP configuration
            let (Some(link), Some(_)) =
                (nc.eigrp_settings(&edge.head), nc.eigrp_settings(&edge.tail))
            else {
                let dropped = queue.drain().len();
                process_log!(
                    self,
                    warn,
                    "edge {} lacks eigrp configuration, dropped {} messages",
                    edge,
                    dropped
                );
                continue;
            };
            let next_hop = nc
                .interface(&edge.tail)
                .and_then(|i| i.addresses.first())
                .map(|a| a.address);
            for advert in queue.drain() {
                let metric = link.metric.accumulate(&advert.route.metric);
                let route = EigrpExternalRoute {
                    network: advert.route.network,
                    metric,
                    admin_distance: self.config.external_admin_distance,
                    process_asn: self.config.asn,
                    destination_asn: advert.route.destination_asn,
                    next_hop,
                    non_routing: false,
                };
                if advert.withdrawn {
                    delta.extend(
                        self.external_rib.remove_route_get_delta(route),
                    );
                } else {
                    delta.extend(
                        self.external_rib.merge_route_get_delta(route),
                    );
                }
            }
        }
        delta
    }

    /// Deliver `delta` into the internal queue of every neighbor that can
    /// see this process.
    fn send_out_internal_routes(
        &self,
        delta: &RibDelta<EigrpInternalRoute>,
    ) -> Result<(), Error> {
        if delta.is_empty() {
            return Ok(());
        }
        for edge in self.incoming_internal.keys() {
            let sender = self.switchboard.internal_sender(&edge.reverse())?;
            sender.send_all(delta.actions().cloned());
        }
        Ok(())
    }

    fn send_out_external_routes(
        &self,
        delta: &RibDelta<EigrpExternalRoute>,
    ) -> Result<(), Error> {
        if delta.is_empty() {
            return Ok(());
        }
        for edge in self.incoming_external.keys() {
            let sender = self.switchboard.external_sender(&edge.reverse())?;
            sender.send_all(delta.actions().cloned());
        }
        Ok(())
    }

    /// Build the external route a main-RIB change would export, or `None`
    /// when policy (or its absence) rejects the candidate.
    fn compute_export_route(
        &self,
        candidate: &MainRibRoute,
    ) -> Option<EigrpExternalRoute> {
        let mut attributes = ExportAttributes::default();
        // EIGRP into EIGRP keeps the existing metric by default
        if let MainRibRoute::Eigrp(route) = candidate {
            attributes.metric = Some(*route.metric());
        }
        let policy = self.export_policy.as_deref()?;
        if policy.evaluate(candidate, &mut attributes, Direction::Outgoing)
            == PolicyResult::Reject
        {
            return None;
        }
        let Some(metric) = attributes.metric else {
            process_log!(
                self,
                warn,
                "policy accepted {} without a metric, cannot export",
                candidate.network()
            );
            return None;
        };
        let destination_asn = match candidate {
            MainRibRoute::Eigrp(EigrpRoute::External(route)) => {
                route.destination_asn
            }
            _ => self.config.asn,
        };
        Some(EigrpExternalRoute {
            network: candidate.network(),
            metric,
            admin_distance: self.config.external_admin_distance,
            process_asn: self.config.asn,
            destination_asn,
            next_hop: None,
            non_routing: true,
        })
    }
}

impl RoutingProcess for EigrpRoutingProcess {
    type Topology = EigrpTopology;
    type Route = EigrpRoute;

    fn initialize(&mut self, config: &RouterConfig) {
        self.initialization_delta = self.init_internal_routes(config);
        process_log!(
            self,
            info,
            "initialized {} local routes on {} interfaces",
            self.initialization_delta.len(),
            self.interfaces.len();
            "hostname" => config.hostname.as_str()
        );
    }

    fn update_topology(&mut self, topology: &EigrpTopology) {
        for edge in self.incoming_internal.keys() {
            self.switchboard.deregister(edge);
        }

        let mut internal = BTreeMap::new();
        let mut external = BTreeMap::new();
        for node in &self.interfaces {
            if !topology.contains_node(node) {
                continue;
            }
            for edge in topology.in_edges(node) {
                let internal_queue = Mailbox::new();
                let external_queue = Mailbox::new();
                self.switchboard
                    .register_internal(edge.clone(), internal_queue.sender());
                self.switchboard
                    .register_external(edge.clone(), external_queue.sender());
                internal.insert(edge.clone(), internal_queue);
                external.insert(edge.clone(), external_queue);
            }
        }

        // Whole-map replacement: edges gone from the new topology lose
        // their queue and any buffered messages with it.
        self.incoming_internal = internal;
        self.incoming_external = external;

        /*
        TODO:
          1. Send existing routes to neighbors that appear in the new
             topology.
          2. Withdraw routes received over edges that are now gone.
        */
    }

    fn execute_iteration(
        &mut self,
        nc: &NetworkConfigurations,
    ) -> Result<(), Error> {
        self.change_set = RibDelta::default();

        // First round after initialization: announce local routes, then
        // clear the initialization delta.
        if !self.initialization_delta.is_empty() {
            let delta = std::mem::take(&mut self.initialization_delta);
            self.send_out_internal_routes(&delta)?;
        }

        let internal_delta = self.process_internal_routes(nc);
        self.send_out_internal_routes(&internal_delta)?;

        // Flush anything queued for redistribution last round.
        let queued = std::mem::take(&mut self.queued_for_redistribution);
        self.send_out_external_routes(&queued)?;

        let external_delta = self.process_external_routes(nc);
        self.send_out_external_routes(&external_delta)?;

        // The union of this round's settled changes is the main-RIB
        // contribution.
        let mut change_set = RibDelta::default();
        change_set.extend(self.rib.apply(&internal_delta));
        change_set.extend(self.rib.apply(&external_delta));
        self.change_set = change_set;

        if !self.change_set.is_empty() {
            process_log!(
                self,
                debug,
                "iteration settled {} main-rib changes",
                self.change_set.len()
            );
        }
        Ok(())
    }

    fn get_updates_for_main_rib(&self) -> RibDelta<EigrpRoute> {
        self.change_set.clone()
    }

    fn redistribute(&mut self, main_rib_delta: &RibDelta<MainRibRoute>) {
        let mut queued = RibDelta::default();
        for action in main_rib_delta.actions() {
            let Some(route) = self.compute_export_route(&action.route)
            else {
                continue;
            };
            if action.withdrawn {
                queued.extend(
                    self.external_rib.remove_route_get_delta(route),
                );
            } else {
                queued.extend(
                    self.external_rib.merge_route_get_delta(route),
                );
            }
        }
        self.queued_for_redistribution = queued;
    }

    fn is_dirty(&self) -> bool {
        self.incoming_internal.values().any(|q| !q.is_empty())
            || self.incoming_external.values().any(|q| !q.is_empty())
            || !self.change_set.is_empty()
            || !self.queued_for_redistribution.is_empty()
            || !self.initialization_delta.is_empty()
    }

    fn iteration_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for route in self.rib.best_routes() {
            route.hash(&mut hasher);
        }
        for (edge, queue) in &self.incoming_internal {
            edge.hash(&mut hasher);
            for advert in queue.contents() {
                advert.hash(&mut hasher);
            }
        }
        for (edge, queue) in &self.incoming_external {
            edge.hash(&mut hasher);
            for advert in queue.contents() {
                advert.hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}
