//! # Change Notification
//!
//! The [`Notifier`] is the only link between the [`Store`](crate::store::Store)
//! and everything that reacts to it (the persistence adapter, a list view).
//! The store owns one and calls [`Notifier::notify_all`] after each successful
//! mutation, handing every subscriber the post-mutation snapshot.
//!
//! ## Identity
//!
//! A subscriber is identified by its `Rc` allocation. Registering a clone of an
//! already registered `Rc` does nothing; registering a second `Rc::new` of an
//! identical closure adds a second subscriber.
//!
//! ## Failure Isolation
//!
//! A subscriber that returns `Err` or panics is logged at `warn` and skipped.
//! The remaining subscribers still run, and the mutation that triggered the
//! pass is not rolled back.

use crate::error::Result;
use crate::model::Entry;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use tracing::warn;

/// Something that wants to hear about store changes.
pub trait Subscriber {
    fn on_change(&self, entries: &[Entry]) -> Result<()>;
}

impl<F> Subscriber for F
where
    F: Fn(&[Entry]) -> Result<()>,
{
    fn on_change(&self, entries: &[Entry]) -> Result<()> {
        self(entries)
    }
}

/// Ordered set of subscribers.
///
/// Uses `RefCell` since the store is single-threaded; this lets subscribers
/// register or unregister through `&self`, including from inside a callback.
#[derive(Default)]
pub struct Notifier {
    subscribers: RefCell<Vec<Rc<dyn Subscriber>>>,
}

fn same_subscriber(a: &Rc<dyn Subscriber>, b: &Rc<dyn Subscriber>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `subscriber` unless that same `Rc` is already registered.
    pub fn register(&self, subscriber: &Rc<dyn Subscriber>) {
        let mut subscribers = self.subscribers.borrow_mut();
        if subscribers.iter().any(|s| same_subscriber(s, subscriber)) {
            return;
        }
        subscribers.push(Rc::clone(subscriber));
    }

    pub fn unregister(&self, subscriber: &Rc<dyn Subscriber>) {
        self.subscribers
            .borrow_mut()
            .retain(|s| !same_subscriber(s, subscriber));
    }

    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }

    /// Calls every subscriber once, in registration order.
    ///
    /// Returns how many subscribers failed. Failures are never propagated.
    pub fn notify_all(&self, entries: &[Entry]) -> usize {
        // Iterate a copy so callbacks may (un)register without a borrow conflict.
        let subscribers: Vec<Rc<dyn Subscriber>> = self.subscribers.borrow().clone();
        let mut failed = 0;

        for (position, subscriber) in subscribers.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| subscriber.on_change(entries))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    failed += 1;
                    warn!(subscriber = position, error = %e, "subscriber failed");
                }
                Err(_) => {
                    failed += 1;
                    warn!(subscriber = position, "subscriber panicked");
                }
            }
        }

        failed
    }
}
