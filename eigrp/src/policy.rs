// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export policy for the redistribution bridge. A policy decides whether a
//! main-RIB route may be redistributed into EIGRP and can rewrite the
//! candidate's attributes while deciding. A process with no policy rejects
//! every candidate.

use crate::metric::EigrpMetric;
use crate::route::MainRibRoute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyResult {
    Accept,
    Reject,
}

/// Attributes of the external route being synthesized, open for the
/// policy to rewrite. The metric is pre-populated when the source route is
/// itself an EIGRP route; for anything else the policy must supply one or
/// the candidate cannot be exported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportAttributes {
    pub metric: Option<EigrpMetric>,
}

pub trait EigrpExportPolicy: Send + Sync {
    fn evaluate(
        &self,
        route: &MainRibRoute,
        attributes: &mut ExportAttributes,
        direction: Direction,
    ) -> PolicyResult;
}

/// Accept every candidate, stamping `default_metric` on routes that do not
/// already carry one.
#[derive(Debug, Clone, Copy)]
pub struct RedistributeAll {
    pub default_metric: EigrpMetric,
}

impl EigrpExportPolicy for RedistributeAll {
    fn evaluate(
        &self,
        _route: &MainRibRoute,
        attributes: &mut ExportAttributes,
        _direction: Direction,
    ) -> PolicyResult {
        attributes.metric.get_or_insert(self.default_metric);
        PolicyResult::Accept
    }
}
