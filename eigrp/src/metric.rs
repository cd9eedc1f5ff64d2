// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Composite EIGRP metric in classic vector form: constraining bandwidth
/// along the path and cumulative delay. Accumulation takes the minimum
/// bandwidth and the sum of delays, which makes it associative and
/// commutative: folding a path hop by hop yields the same metric under any
/// re-association of the hop sequence. That property is what lets the
/// process apply queued advertisements in arbitrary batches and still
/// converge to the same fixed point.
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
pub struct EigrpMetric {
    /// Constraining bandwidth in kilobits per second.
    pub bandwidth: u64,
    /// Cumulative delay in tens of microseconds.
    pub delay: u64,
}

impl EigrpMetric {
    pub fn new(bandwidth: u64, delay: u64) -> Self {
        Self { bandwidth, delay }
    }

    /// Compose this metric with `other`: the result reflects a path that
    /// traverses both. Never decreases the scalar cost.
    pub fn accumulate(&self, other: &EigrpMetric) -> EigrpMetric {
        EigrpMetric {
            bandwidth: self.bandwidth.min(other.bandwidth),
            delay: self.delay.saturating_add(other.delay),
        }
    }

    /// Scalar ranking cost via the classic composite formula
    /// `256 * (10^7 / bandwidth + delay)`. A zero bandwidth is an
    /// unreachable path and ranks worst.
    pub fn cost(&self) -> u64 {
        if self.bandwidth == 0 {
            return u64::MAX;
        }
        (10_000_000 / self.bandwidth)
            .saturating_add(self.delay)
            .saturating_mul(256)
    }
}

impl Display for EigrpMetric {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[bandwidth={}, delay={}, cost={}]",
            self.bandwidth,
            self.delay,
            self.cost()
        )
    }
}

#[cfg(test)]
mod test {
    use super::EigrpMetric;

    #[test]
    fn accumulate_is_reassociation_invariant() {
        let hops = [
            EigrpMetric::new(100_000, 10),
            EigrpMetric::new(10_000, 100),
            EigrpMetric::new(1_000_000, 1),
            EigrpMetric::new(50_000, 25),
        ];

        // left fold
        let left = hops[0]
            .accumulate(&hops[1])
            .accumulate(&hops[2])
            .accumulate(&hops[3]);

        // right fold
        let right = hops[0].accumulate(
            &hops[1].accumulate(&hops[2].accumulate(&hops[3])),
        );

        // pairwise
        let pairs = hops[0]
            .accumulate(&hops[1])
            .accumulate(&hops[2].accumulate(&hops[3]));

        assert_eq!(left, right);
        assert_eq!(left, pairs);
        assert_eq!(left, EigrpMetric::new(10_000, 136));
    }

    #[test]
    fn accumulate_never_decreases_cost() {
        let base = EigrpMetric::new(100_000, 10);
        let hop = EigrpMetric::new(1_000_000, 1);
        assert!(base.accumulate(&hop).cost() >= base.cost());
        assert!(base.accumulate(&base).cost() >= base.cost());
    }

    #[test]
    fn zero_bandwidth_ranks_worst() {
        let unreachable = EigrpMetric::new(0, 0);
        let slow = EigrpMetric::new(1, u64::MAX);
        assert_eq!(unreachable.cost(), u64::MAX);
        assert!(slow.cost() <= unreachable.cost());
    }
}
