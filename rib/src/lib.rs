// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Routing information base support.
//!
//! This crate holds the pieces of a RIB that are shared by every routing
//! process in the dataplane engine: the IPv4 prefix type, route
//! advertisements, ordered deltas, and a generic best-route store. The
//! store keeps every candidate route it has been given and exposes merge
//! and remove operations that report the net change to the best entry for
//! a network. Protocol-specific preference is expressed through the
//! [`RibRoute`] trait rather than baked into the store.

pub mod delta;
pub mod store;
pub mod types;

pub use delta::{RibDelta, RouteAdvertisement};
pub use store::{Rib, RibRoute};
pub use types::Prefix4;
