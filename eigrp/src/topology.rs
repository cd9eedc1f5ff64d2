// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::neighbor::{EigrpEdge, EigrpNeighborConfigId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The EIGRP adjacency graph: protocol-enabled interfaces as nodes,
/// directed adjacencies as edges. A snapshot; the orchestrator hands each
/// process a fresh topology whenever adjacencies change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EigrpTopology {
    edges: BTreeSet<EigrpEdge>,
}

impl EigrpTopology {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(edges: impl IntoIterator<Item = EigrpEdge>) -> Self {
        Self {
            edges: edges.into_iter().collect(),
        }
    }

    pub fn add_edge(&mut self, edge: EigrpEdge) {
        self.edges.insert(edge);
    }

    /// Add both directions of an adjacency between `a` and `b`.
    pub fn add_adjacency(
        &mut self,
        a: EigrpNeighborConfigId,
        b: EigrpNeighborConfigId,
    ) {
        self.edges.insert(EigrpEdge::new(a.clone(), b.clone()));
        self.edges.insert(EigrpEdge::new(b, a));
    }

    pub fn edges(&self) -> impl Iterator<Item = &EigrpEdge> {
        self.edges.iter()
    }

    pub fn contains_node(&self, node: &EigrpNeighborConfigId) -> bool {
        self.edges
            .iter()
            .any(|e| &e.tail == node || &e.head == node)
    }

    /// Edges over which `node` can receive messages, in edge order.
    pub fn in_edges<'a>(
        &'a self,
        node: &'a EigrpNeighborConfigId,
    ) -> impl Iterator<Item = &'a EigrpEdge> {
        self.edges.iter().filter(move |e| &e.head == node)
    }
}
