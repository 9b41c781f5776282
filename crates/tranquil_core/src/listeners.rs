//! Change listeners
//!
//! A small callback registry used for "something changed" notifications:
//! performance samples, theme switches, visual-mode changes. Subscribing
//! returns a [`ListenerId`] that acts as the unsubscribe token.
//!
//! Listeners run synchronously on the caller's thread. A listener that panics
//! is logged and skipped; it never prevents the remaining listeners from
//! observing the value.

use slotmap::{new_key_type, SlotMap};
use std::panic::{catch_unwind, AssertUnwindSafe};

new_key_type! {
    /// Token returned by [`Listeners::subscribe`]
    pub struct ListenerId;
}

type Callback<T> = Box<dyn FnMut(&T)>;

/// Registry of callbacks observing values of type `T`
pub struct Listeners<T> {
    callbacks: SlotMap<ListenerId, Callback<T>>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            callbacks: SlotMap::with_key(),
        }
    }

    /// Register a callback
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&T) + 'static,
    {
        self.callbacks.insert(Box::new(callback))
    }

    /// Remove a callback. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.callbacks.remove(id).is_some()
    }

    /// Invoke every callback with `value`.
    ///
    /// Returns the number of callbacks that completed without panicking.
    pub fn notify(&mut self, value: &T) -> usize {
        let mut delivered = 0;
        for (id, callback) in self.callbacks.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| callback(value))) {
                Ok(()) => delivered += 1,
                Err(_) => tracing::warn!(?id, "listener panicked; continuing with remaining listeners"),
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_reaches_all_subscribers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();

        let a = seen.clone();
        listeners.subscribe(move |v: &i32| a.borrow_mut().push(("a", *v)));
        let b = seen.clone();
        listeners.subscribe(move |v: &i32| b.borrow_mut().push(("b", *v)));

        assert_eq!(listeners.notify(&7), 2);
        let mut seen = seen.borrow().clone();
        seen.sort_unstable();
        assert_eq!(seen, vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();
        let c = count.clone();
        let id = listeners.subscribe(move |_: &()| *c.borrow_mut() += 1);

        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.notify(&());
        assert_eq!(*count.borrow(), 0);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_panicking_listener_does_not_block_others() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();

        listeners.subscribe(|_: &u8| panic!("listener failure"));
        let c = count.clone();
        listeners.subscribe(move |_: &u8| *c.borrow_mut() += 1);

        let delivered = listeners.notify(&1);
        assert_eq!(delivered, 1);
        assert_eq!(*count.borrow(), 1);

        // The panicking listener stays registered and keeps being isolated.
        listeners.notify(&2);
        assert_eq!(*count.borrow(), 2);
    }
}
