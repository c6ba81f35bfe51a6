//! # Store
//!
//! The single authoritative collection of [`Entry`] values.
//!
//! There is exactly one `Store` per process. It is not a global: the composition
//! root ([`TodozApi`](crate::api::TodozApi)) builds it once at startup and hands an
//! `Rc<Store>` to whoever needs it.
//!
//! ## Invariants
//!
//! - At most one entry per distinct text.
//! - Entries keep insertion order, so snapshots are stable and rendering is
//!   deterministic.
//! - Every successful mutation is followed by exactly one notification pass,
//!   and the pass completes before the mutating call returns
//!   (mutation, then notify, then return).
//! - A rejected mutation (duplicate add, missing remove) never notifies.
//!
//! The interior borrow is always released before subscribers run, so a
//! subscriber may read the store, or even mutate it, from its callback.

use crate::model::Entry;
use crate::notifier::{Notifier, Subscriber};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

#[derive(Default)]
pub struct Store {
    entries: RefCell<Vec<Entry>>,
    notifier: Notifier,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current contents, in insertion order.
    pub fn items(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Inserts `entry` unless an equal one is already present.
    pub fn add(&self, entry: Entry) -> bool {
        {
            let mut entries = self.entries.borrow_mut();
            if entries.contains(&entry) {
                debug!(text = entry.text(), "duplicate entry rejected");
                return false;
            }
            debug!(text = entry.text(), "entry added");
            entries.push(entry);
        }
        self.notify();
        true
    }

    pub fn remove_by_text(&self, text: &str) -> bool {
        {
            let mut entries = self.entries.borrow_mut();
            let Some(position) = entries.iter().position(|e| e.text() == text) else {
                debug!(text, "no entry to remove");
                return false;
            };
            entries.remove(position);
            debug!(text, "entry removed");
        }
        self.notify();
        true
    }

    pub fn find_by_text(&self, text: &str) -> Option<Entry> {
        self.entries
            .borrow()
            .iter()
            .find(|e| e.text() == text)
            .cloned()
    }

    pub fn exists(&self, entry: &Entry) -> bool {
        self.entries.borrow().contains(entry)
    }

    /// Swaps the whole collection for `entries` and notifies once.
    ///
    /// Each input is rebuilt as a fresh [`Entry`] from its text. When the input
    /// repeats a text, the first occurrence wins and keeps its position.
    pub fn replace_all<I, E>(&self, entries: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        {
            let mut current = self.entries.borrow_mut();
            current.clear();
            for entry in entries.into_iter().map(Into::into) {
                if !current.contains(&entry) {
                    current.push(entry);
                }
            }
            debug!(count = current.len(), "entries replaced");
        }
        self.notify();
    }

    pub fn subscribe(&self, subscriber: &Rc<dyn Subscriber>) {
        self.notifier.register(subscriber);
    }

    pub fn unsubscribe(&self, subscriber: &Rc<dyn Subscriber>) {
        self.notifier.unregister(subscriber);
    }

    fn notify(&self) {
        let snapshot = self.items();
        self.notifier.notify_all(&snapshot);
    }
}
