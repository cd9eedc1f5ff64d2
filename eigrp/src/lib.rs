// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An EIGRP routing process for the iterative dataplane engine.
//!
//! The engine runs one routing process per (protocol, router, VRF) round by
//! round until no process reports pending work; the union of each process's
//! main-RIB contributions becomes the router's forwarding table. This crate
//! implements the EIGRP process: a distance-vector algorithm driven entirely
//! by queued route advertisements exchanged between simulated neighbors.
//!
//! The process does not open sockets or parse wire formats. Neighbors
//! deliver messages by appending to per-adjacency mailboxes through the
//! [`switchboard::Switchboard`], and the orchestrator drives the lifecycle
//! defined by [`process::RoutingProcess`]. Rounds are synchronous from the
//! process's point of view: a call to `execute_iteration` drains every
//! inbox, settles the RIBs, and fans the resulting deltas out to neighbors
//! before returning.

pub mod config;
pub mod error;
pub mod log;
pub mod mailbox;
pub mod metric;
pub mod neighbor;
pub mod policy;
pub mod process;
pub mod route;
pub mod switchboard;
pub mod topology;


pub use process::{EigrpRoutingProcess, RoutingProcess};

/// Default administrative distance for routes internal to the process ASN.
pub const DEFAULT_INTERNAL_ADMIN_DISTANCE: u8 = 90;

/// Default administrative distance for redistributed (external) routes.
pub const DEFAULT_EXTERNAL_ADMIN_DISTANCE: u8 = 170;

pub const COMPONENT_EIGRP: &str = "eigrp";
pub const MOD_PROCESS: &str = "process";
