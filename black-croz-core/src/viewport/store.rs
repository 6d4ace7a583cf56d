//! Snapshot store for [`ActivityState`].
//!
//! The store is a single-threaded shared handle. Readers clone it freely and
//! call [`get_snapshot`](ActivityStore::get_snapshot) or
//! [`subscribe`](ActivityStore::subscribe); only the tracker commits new
//! states.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::model::ActivityState;

type Listener = Rc<dyn Fn(&ActivityState)>;

struct StoreInner {
    state: Rc<ActivityState>,
    listeners: Vec<(u64, Listener)>,
    next_listener: u64,
}

/// Read handle on the tracker's activity state.
#[derive(Clone)]
pub struct ActivityStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl ActivityStore {
    pub(crate) fn new(initial: ActivityState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                state: Rc::new(initial),
                listeners: Vec::new(),
                next_listener: 0,
            })),
        }
    }

    /// Current state. The returned snapshot never changes; later transitions
    /// produce new snapshots.
    pub fn get_snapshot(&self) -> Rc<ActivityState> {
        Rc::clone(&self.inner.borrow().state)
    }

    /// Registers `listener` to be called after every committed transition.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or [`unsubscribed`](Subscription::unsubscribe).
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ActivityState) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener;
        inner.next_listener += 1;
        inner.listeners.push((id, Rc::new(listener)));

        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Replaces the state and notifies every listener once.
    ///
    /// No borrow is held while listeners run, so they may read the store,
    /// subscribe, or drop subscriptions. A listener removed by an earlier
    /// listener in the same round is not called.
    pub(crate) fn commit(&self, next: ActivityState) {
        let (snapshot, ids) = {
            let mut inner = self.inner.borrow_mut();
            inner.state = Rc::new(next);
            let ids: Vec<u64> = inner.listeners.iter().map(|(id, _)| *id).collect();
            (Rc::clone(&inner.state), ids)
        };

        for id in ids {
            let listener = self
                .inner
                .borrow()
                .listeners
                .iter()
                .find(|(lid, _)| *lid == id)
                .map(|(_, l)| Rc::clone(l));
            if let Some(listener) = listener {
                listener(&snapshot);
            }
        }
    }
}

impl fmt::Debug for ActivityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ActivityStore")
            .field("state", &inner.state)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Keeps a store listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    store: Weak<RefCell<StoreInner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
