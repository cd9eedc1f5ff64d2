// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::delta::RibDelta;
use crate::types::Prefix4;
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;

/// A route that can live in a [`Rib`]. Preference between routes for the
/// same network is (admin distance, cost), lowest wins; the route's total
/// order is the final tie break so that best selection is deterministic
/// across runs regardless of insertion order.
pub trait RibRoute: Clone + Eq + Ord + Hash {
    /// The network this route reaches.
    fn network(&self) -> Prefix4;

    /// Tie-break preference between routes from different sources.
    fn admin_distance(&self) -> u8;

    /// Composite cost used to rank routes within the same source.
    fn cost(&self) -> u64;
}

/// A candidate route store with best-route selection. Every route merged
/// into the store is retained as a candidate; merge and remove report the
/// net change to the best entry for the affected network as a [`RibDelta`].
#[derive(Debug, Clone)]
pub struct Rib<R: RibRoute> {
    routes: BTreeMap<Prefix4, BTreeSet<R>>,
}

// #derive(Default) would bound R: Default
impl<R: RibRoute> Default for Rib<R> {
    fn default() -> Self {
        Self {
            routes: BTreeMap::new(),
        }
    }
}

impl<R: RibRoute> Rib<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The unique best route for `prefix`, if any candidate exists.
    pub fn best(&self, prefix: &Prefix4) -> Option<&R> {
        let candidates = self.routes.get(prefix)?;
        candidates
            .iter()
            .min_set_by_key(|r| (r.admin_distance(), r.cost()))
            .into_iter()
            .min()
    }

    /// All candidate routes for `prefix` in route order.
    pub fn candidates(
        &self,
        prefix: &Prefix4,
    ) -> impl Iterator<Item = &R> + '_ {
        self.routes.get(prefix).into_iter().flatten()
    }

    /// Iterate the best route for every network in prefix order.
    pub fn best_routes(&self) -> impl Iterator<Item = &R> + '_ {
        self.routes.keys().filter_map(|p| self.best(p))
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Add `route` as a candidate and return the resulting change to the
    /// best entry for its network. Merging a route that does not displace
    /// the current best yields an empty delta.
    pub fn merge_route_get_delta(&mut self, route: R) -> RibDelta<R> {
        let prefix = route.network();
        let previous = self.best(&prefix).cloned();
        self.routes.entry(prefix).or_default().insert(route);
        self.transition(prefix, previous)
    }

    /// Remove `route` from the candidates for its network and return the
    /// resulting change to the best entry. Removing a route that was never
    /// merged is a no-op delta.
    pub fn remove_route_get_delta(&mut self, route: R) -> RibDelta<R> {
        let prefix = route.network();
        match self.routes.get(&prefix) {
            Some(candidates) if candidates.contains(&route) => {}
            _ => return RibDelta::default(),
        }
        let previous = self.best(&prefix).cloned();
        if let Some(candidates) = self.routes.get_mut(&prefix) {
            candidates.remove(&route);
            if candidates.is_empty() {
                self.routes.remove(&prefix);
            }
        }
        self.transition(prefix, previous)
    }

    /// Replay a delta produced by another RIB into this one, converting
    /// route representations, and return the net resulting delta.
    pub fn apply<S>(&mut self, delta: &RibDelta<S>) -> RibDelta<R>
    where
        S: Clone + Into<R>,
    {
        let mut result = RibDelta::default();
        for action in delta.actions() {
            let route: R = action.route.clone().into();
            if action.withdrawn {
                result.extend(self.remove_route_get_delta(route));
            } else {
                result.extend(self.merge_route_get_delta(route));
            }
        }
        result
    }

    fn transition(
        &self,
        prefix: Prefix4,
        previous: Option<R>,
    ) -> RibDelta<R> {
        let current = self.best(&prefix).cloned();
        let mut delta = RibDelta::default();
        if previous == current {
            return delta;
        }
        if let Some(old) = previous {
            delta.remove(old);
        }
        if let Some(new) = current {
            delta.merge(new);
        }
        delta
    }
}

#[cfg(test)]
mod test {
    use super::{Rib, RibRoute};
    use crate::delta::RouteAdvertisement;
    use crate::types::Prefix4;
    use pretty_assertions::assert_eq;

    #[derive(
        Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    )]
    struct TestRoute {
        network: Prefix4,
        admin: u8,
        cost: u64,
        id: u32,
    }

    impl RibRoute for TestRoute {
        fn network(&self) -> Prefix4 {
            self.network
        }
        fn admin_distance(&self) -> u8 {
            self.admin
        }
        fn cost(&self) -> u64 {
            self.cost
        }
    }

    fn route(admin: u8, cost: u64, id: u32) -> TestRoute {
        TestRoute {
            network: "198.51.100.0/24".parse().unwrap(),
            admin,
            cost,
            id,
        }
    }

    #[test]
    fn merge_first_route_is_best() {
        let mut rib = Rib::new();
        let r = route(90, 100, 1);
        let delta = rib.merge_route_get_delta(r);
        assert_eq!(
            delta.into_actions(),
            vec![RouteAdvertisement::new(r)]
        );
        assert_eq!(rib.best(&r.network()), Some(&r));
    }

    #[test]
    fn better_route_displaces_best() {
        let mut rib = Rib::new();
        let worse = route(90, 200, 1);
        let better = route(90, 100, 2);
        rib.merge_route_get_delta(worse);

        let delta = rib.merge_route_get_delta(better);
        assert_eq!(
            delta.into_actions(),
            vec![
                RouteAdvertisement::withdrawing(worse),
                RouteAdvertisement::new(better),
            ]
        );
        // losing candidate is retained
        assert_eq!(rib.candidates(&worse.network()).count(), 2);
    }

    #[test]
    fn worse_route_is_silent_backup() {
        let mut rib = Rib::new();
        let best = route(90, 100, 1);
        let backup = route(170, 50, 2);
        rib.merge_route_get_delta(best);

        // higher admin distance loses even at lower cost
        let delta = rib.merge_route_get_delta(backup);
        assert!(delta.is_empty());
        assert_eq!(rib.best(&best.network()), Some(&best));

        // removing the best promotes the backup
        let delta = rib.remove_route_get_delta(best);
        assert_eq!(
            delta.into_actions(),
            vec![
                RouteAdvertisement::withdrawing(best),
                RouteAdvertisement::new(backup),
            ]
        );
    }

    #[test]
    fn remove_absent_route_is_noop() {
        let mut rib = Rib::new();
        let delta = rib.remove_route_get_delta(route(90, 100, 1));
        assert!(delta.is_empty());

        rib.merge_route_get_delta(route(90, 100, 1));
        // same network, different candidate identity
        let delta = rib.remove_route_get_delta(route(90, 100, 2));
        assert!(delta.is_empty());
    }

    #[test]
    fn remerge_identical_route_is_noop() {
        let mut rib = Rib::new();
        let r = route(90, 100, 1);
        rib.merge_route_get_delta(r);
        let delta = rib.merge_route_get_delta(r);
        assert!(delta.is_empty());
    }

    #[test]
    fn equal_preference_tie_break_is_deterministic() {
        let a = route(90, 100, 1);
        let b = route(90, 100, 2);

        let mut rib = Rib::new();
        rib.merge_route_get_delta(a);
        rib.merge_route_get_delta(b);
        let forward = *rib.best(&a.network()).unwrap();

        let mut rib = Rib::new();
        rib.merge_route_get_delta(b);
        rib.merge_route_get_delta(a);
        let reverse = *rib.best(&a.network()).unwrap();

        assert_eq!(forward, reverse);
    }

    #[test]
    fn apply_replays_delta() {
        let mut source = Rib::new();
        let mut combined: Rib<TestRoute> = Rib::new();

        let r = route(90, 100, 1);
        let delta = source.merge_route_get_delta(r);
        let imported = combined.apply(&delta);
        assert_eq!(
            imported.into_actions(),
            vec![RouteAdvertisement::new(r)]
        );

        let delta = source.remove_route_get_delta(r);
        let imported = combined.apply(&delta);
        assert_eq!(
            imported.into_actions(),
            vec![RouteAdvertisement::withdrawing(r)]
        );
        assert!(combined.is_empty());
    }
}
