// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

/// The unit of inter-process route exchange. A withdrawn advertisement
/// retracts a previously advertised route rather than updating it.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RouteAdvertisement<R> {
    pub route: R,
    pub withdrawn: bool,
}

impl<R> RouteAdvertisement<R> {
    pub fn new(route: R) -> Self {
        Self {
            route,
            withdrawn: false,
        }
    }

    pub fn withdrawing(route: R) -> Self {
        Self {
            route,
            withdrawn: true,
        }
    }
}

/// The net observable change produced by one or more RIB operations: an
/// ordered list of merges and withdrawals. Deltas compose by concatenation
/// and are replayed in order to propagate changes, so intermediate
/// transitions within a round are preserved, not collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RibDelta<R> {
    actions: Vec<RouteAdvertisement<R>>,
}

// #derive(Default) would bound R: Default
impl<R> Default for RibDelta<R> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
        }
    }
}

impl<R> RibDelta<R> {
    pub fn merge(&mut self, route: R) {
        self.actions.push(RouteAdvertisement::new(route));
    }

    pub fn remove(&mut self, route: R) {
        self.actions.push(RouteAdvertisement::withdrawing(route));
    }

    /// Append all of `other`'s actions to this delta.
    pub fn extend(&mut self, other: RibDelta<R>) {
        self.actions.extend(other.actions);
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn actions(&self) -> impl Iterator<Item = &RouteAdvertisement<R>> {
        self.actions.iter()
    }

    pub fn into_actions(self) -> Vec<RouteAdvertisement<R>> {
        self.actions
    }
}

impl<R> From<Vec<RouteAdvertisement<R>>> for RibDelta<R> {
    fn from(actions: Vec<RouteAdvertisement<R>>) -> Self {
        Self { actions }
    }
}

impl<R> IntoIterator for RibDelta<R> {
    type Item = RouteAdvertisement<R>;
    type IntoIter = std::vec::IntoIter<RouteAdvertisement<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}
