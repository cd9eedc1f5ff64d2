// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-adjacency message queues. A [`Mailbox`] is owned by the receiving
//! process and drained at the start of its round; [`MailboxSender`] handles
//! are published through the switchboard so neighbors can append while the
//! owner is between rounds. Appends and drains may interleave freely; each
//! sees FIFO order per edge.

use ibdp_common::lock;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
pub struct Mailbox<T> {
    inner: Arc<Mutex<VecDeque<T>>>,
}

#[derive(Debug)]
pub struct MailboxSender<T> {
    inner: Arc<Mutex<VecDeque<T>>>,
}

//NOTE necessary as #derive is broken for generic types
impl<T> Clone for MailboxSender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn sender(&self) -> MailboxSender<T> {
        MailboxSender {
            inner: self.inner.clone(),
        }
    }

    /// Take every queued message in arrival order.
    pub fn drain(&self) -> Vec<T> {
        lock!(self.inner).drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        lock!(self.inner).is_empty()
    }

    pub fn len(&self) -> usize {
        lock!(self.inner).len()
    }
}

impl<T: Clone> Mailbox<T> {
    /// A copy of the queued messages without consuming them, for the
    /// iteration hash.
    pub fn contents(&self) -> Vec<T> {
        lock!(self.inner).iter().cloned().collect()
    }
}

impl<T> MailboxSender<T> {
    pub fn send(&self, item: T) {
        lock!(self.inner).push_back(item);
    }

    pub fn send_all(&self, items: impl IntoIterator<Item = T>) {
        let mut queue = lock!(self.inner);
        queue.extend(items);
    }
}
