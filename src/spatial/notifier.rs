//! Synchronous change notification for grid writes

use std::fmt;

/// A successful write to one cell
#[derive(Debug, PartialEq, Eq)]
pub struct CellChange<'a, T> {
    /// Column of the written cell
    pub x: i32,
    /// Row of the written cell
    pub y: i32,
    /// New content (`None` when the cell was emptied)
    pub value: Option<&'a T>,
}

/// Handle returned by [`ChangeNotifier::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(&CellChange<'_, T>)>;

struct Subscriber<T> {
    id: SubscriptionId,
    callback: Callback<T>,
}

/// Ordered registry of change callbacks
///
/// Callbacks run on the caller's thread, in the order they subscribed,
/// once per dispatched change.
pub struct ChangeNotifier<T> {
    subscribers: Vec<Subscriber<T>>,
    next_id: u64,
}

impl<T> ChangeNotifier<T> {
    /// Create a notifier with no subscribers
    pub const fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a callback and return its handle
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&CellChange<'_, T>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        log::debug!("subscriber {} attached", id.0);
        id
    }

    /// Remove a callback
    ///
    /// Returns false when the handle was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|subscriber| subscriber.id != id);
        let removed = self.subscribers.len() != before;
        if removed {
            log::debug!("subscriber {} detached", id.0);
        }
        removed
    }

    /// Deliver a change to every subscriber
    pub fn notify(&mut self, change: &CellChange<'_, T>) {
        for subscriber in &mut self.subscribers {
            (subscriber.callback)(change);
        }
    }

    /// Number of registered callbacks
    pub const fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Test if no callbacks are registered
    pub const fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<T> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ChangeNotifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
