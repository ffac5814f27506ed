//! Event infrastructure for synchronous observer notification.
//!
//! This module provides the push surface of the runtime:
//! - `Observers` - Ordered list of callbacks fired in registration order
//! - `SubscriptionId` - Handle returned by `subscribe`, used to unsubscribe
//! - `StageChanged` - Event fired by every lifecycle on each stage change

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{EntityLabel, Stage};

// ============================================
// Observers
// ============================================

/// Handle identifying one subscription on an [`Observers`] list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

type Callback<E> = Box<dyn FnMut(&E)>;

/// Synchronous observer list.
///
/// Callbacks run on the calling thread, in the order they were registered,
/// before `notify` returns.
///
/// # Example
///
/// ```ignore
/// let mut observers = Observers::new();
/// let id = observers.subscribe(|event: &StageChanged| println!("{}", event.stage));
/// observers.notify(&event);
/// observers.unsubscribe(id);
/// ```
pub struct Observers<E> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Observers<E> {
    /// Creates an empty observer list.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }

    /// Registers a callback and returns its subscription handle.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    /// Invokes every callback with the event, in registration order.
    pub fn notify(&mut self, event: &E) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}

// ============================================
// Lifecycle Events
// ============================================

/// Fired whenever an entity's lifecycle changes stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageChanged {
    /// The entity whose stage changed.
    pub sender: EntityLabel,
    /// The stage the entity left.
    pub previous: Stage,
    /// The stage the entity entered.
    pub stage: Stage,
}
