// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The switchboard connects processes without letting any of them reach
//! into another's inbox: each process registers a [`MailboxSender`] for
//! every edge it can receive over, and neighbors look senders up by the
//! reverse of their own in-edges. One switchboard is shared by every
//! process in a simulated network.

use crate::error::Error;
use crate::mailbox::MailboxSender;
use crate::neighbor::EigrpEdge;
use crate::route::{EigrpExternalRoute, EigrpInternalRoute};
use ibdp_common::{read_lock, write_lock};
use rib::RouteAdvertisement;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

type Registry<R> = Arc<RwLock<BTreeMap<EigrpEdge, MailboxSender<RouteAdvertisement<R>>>>>;

#[derive(Debug, Clone, Default)]
pub struct Switchboard {
    internal: Registry<EigrpInternalRoute>,
    external: Registry<EigrpExternalRoute>,
}

impl Switchboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_internal(
        &self,
        edge: EigrpEdge,
        sender: MailboxSender<RouteAdvertisement<EigrpInternalRoute>>,
    ) {
        write_lock!(self.internal).insert(edge, sender);
    }

    pub fn register_external(
        &self,
        edge: EigrpEdge,
        sender: MailboxSender<RouteAdvertisement<EigrpExternalRoute>>,
    ) {
        write_lock!(self.external).insert(edge, sender);
    }

    /// Drop both channels for an edge that no longer exists.
    pub fn deregister(&self, edge: &EigrpEdge) {
        write_lock!(self.internal).remove(edge);
        write_lock!(self.external).remove(edge);
    }

    pub fn internal_sender(
        &self,
        edge: &EigrpEdge,
    ) -> Result<MailboxSender<RouteAdvertisement<EigrpInternalRoute>>, Error>
    {
        read_lock!(self.internal)
            .get(edge)
            .cloned()
            .ok_or_else(|| Error::NoProcessForEdge(edge.clone()))
    }

    pub fn external_sender(
        &self,
        edge: &EigrpEdge,
    ) -> Result<MailboxSender<RouteAdvertisement<EigrpExternalRoute>>, Error>
    {
        read_lock!(self.external)
            .get(edge)
            .cloned()
            .ok_or_else(|| Error::NoProcessForEdge(edge.clone()))
    }
}
