// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::neighbor::EigrpEdge;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A topology edge resolves to a neighbor that has no reachable
    /// routing process. The edge should never exist without one; this is
    /// a configuration-consistency fault, not a transient condition.
    #[error("no routing process reachable over edge {0}")]
    NoProcessForEdge(EigrpEdge),

    /// A message was enqueued for an edge the receiving process does not
    /// currently have a queue for. Silently dropping it would corrupt
    /// convergence.
    #[error("message enqueued for unregistered edge {0}")]
    UnregisteredEdge(EigrpEdge),
}
