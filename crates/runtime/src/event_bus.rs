use std::mem;

use tracing::trace;

/// Handle returned by [`EventBus::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Largest integer a JavaScript number holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl SubscriptionId {
    /// Id as a JavaScript number.
    pub fn to_f64(self) -> f64 {
        self.0 as f64
    }

    /// Inverse of [`SubscriptionId::to_f64`]. Negative, fractional, non-finite
    /// and out-of-range values are rejected.
    pub fn from_f64(raw: f64) -> Option<Self> {
        let valid = raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= MAX_SAFE_INTEGER;
        valid.then(|| Self(raw as u64))
    }
}

type Callback<E> = Box<dyn FnMut(&E)>;

/// Synchronous, single-threaded publish/subscribe bus.
///
/// Ordering contract:
/// - `publish` invokes every subscriber before returning.
/// - Subscribers run in subscription order.
///
/// Owners that share the bus behind a `RefCell` deliver through
/// [`EventBus::detach`] / [`EventBus::reattach`] instead, so callbacks run with
/// no borrow held and may subscribe, unsubscribe or query the bus.
pub struct EventBus<E> {
    subscribers: Vec<(SubscriptionId, Callback<E>)>,
    next_id: u64,
    published: u64,
    /// Ids currently out on a [`Detached`] delivery.
    in_flight: Vec<SubscriptionId>,
    /// In-flight ids unsubscribed during the delivery.
    removed: Vec<SubscriptionId>,
    detached: bool,
}

/// Subscribers taken off a bus for one delivery.
pub struct Detached<E> {
    subscribers: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Detached<E> {
    pub fn deliver(&mut self, event: &E) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
            published: 0,
            in_flight: Vec::new(),
            removed: Vec::new(),
            detached: false,
        }
    }
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("published", &self.published)
            .field("detached", &self.detached)
            .finish()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `true` if `id` was subscribed.
    ///
    /// During a detached delivery an in-flight subscriber still receives the
    /// current event; removal applies from the next one.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        if self.subscribers.len() != before {
            return true;
        }
        if self.in_flight.contains(&id) && !self.removed.contains(&id) {
            self.removed.push(id);
            return true;
        }
        false
    }

    pub fn publish(&mut self, event: &E) {
        self.published += 1;
        trace!(subscribers = self.subscribers.len(), "publish");
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len() + self.in_flight.len() - self.removed.len()
    }

    /// True between [`EventBus::detach`] and [`EventBus::reattach`].
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Takes the subscribers out for one delivery. Subscriptions made before
    /// the matching `reattach` first see the next event.
    ///
    /// Calling it again before `reattach` yields an empty delivery.
    pub fn detach(&mut self) -> Detached<E> {
        if self.detached {
            return Detached {
                subscribers: Vec::new(),
            };
        }
        self.published += 1;
        self.detached = true;
        let subscribers = mem::take(&mut self.subscribers);
        self.in_flight = subscribers.iter().map(|(id, _)| *id).collect();
        trace!(subscribers = subscribers.len(), "publish detached");
        Detached { subscribers }
    }

    /// Puts delivered subscribers back ahead of any added meanwhile, dropping
    /// those unsubscribed during the delivery.
    pub fn reattach(&mut self, detached: Detached<E>) {
        let removed = mem::take(&mut self.removed);
        self.in_flight.clear();
        self.detached = false;
        let added = mem::take(&mut self.subscribers);
        self.subscribers = detached
            .subscribers
            .into_iter()
            .filter(|(id, _)| !removed.contains(id))
            .chain(added)
            .collect();
    }

    /// Number of events published over the bus lifetime.
    pub fn published(&self) -> u64 {
        self.published
    }
}
