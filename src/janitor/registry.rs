//! Trackable Registry
//!
//! Ordered identity set of tracked trackables plus a non-owning label table.
//! Identity is the address of the shared allocation, so registering the same
//! handle twice is a no-op while two equal-looking values stay distinct.

use super::traits::{Trackable, TrackableRef};
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

/// Identity of a trackable: the address of its allocation
pub(crate) fn identity(trackable: &TrackableRef) -> usize {
    Rc::as_ptr(trackable) as *const () as usize
}

/// Label held without keeping its trackable alive
struct WeakLabel {
    target: Weak<dyn Trackable>,
    label: String,
}

impl WeakLabel {
    fn is_live(&self) -> bool {
        self.target.strong_count() > 0
    }
}

#[derive(Default)]
pub struct Registry {
    /// Tracked trackables in registration order
    trackables: Vec<TrackableRef>,

    /// Identities of `trackables`
    members: HashSet<usize>,

    /// Labels keyed by identity
    labels: HashMap<usize, WeakLabel>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("trackables", &self.trackables.len())
            .field(
                "labels",
                &self
                    .labels
                    .values()
                    .filter(|entry| entry.is_live())
                    .map(|entry| entry.label.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a trackable; returns false if it was already tracked
    pub fn insert(&mut self, trackable: TrackableRef) -> bool {
        if !self.members.insert(identity(&trackable)) {
            return false;
        }
        self.trackables.push(trackable);
        true
    }

    pub fn contains(&self, trackable: &TrackableRef) -> bool {
        self.members.contains(&identity(trackable))
    }

    pub fn len(&self) -> usize {
        self.trackables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackables.is_empty()
    }

    /// Registration-ordered copy of the tracked handles
    pub fn snapshot(&self) -> Vec<TrackableRef> {
        self.trackables.clone()
    }

    /// Forget every tracked trackable and drop labels whose target is gone
    pub fn clear(&mut self) {
        self.trackables.clear();
        self.members.clear();
        self.prune();
    }

    /// Associate a label with a trackable, replacing any previous one
    ///
    /// Entries left behind by trackables that have since been dropped are
    /// pruned first, so the table only grows with live labels.
    pub fn set_label(&mut self, trackable: &TrackableRef, label: impl Into<String>) {
        self.prune();
        self.labels.insert(
            identity(trackable),
            WeakLabel {
                target: Rc::downgrade(trackable),
                label: label.into(),
            },
        );
    }

    pub fn label_of(&self, trackable: &TrackableRef) -> Option<&str> {
        self.labels
            .get(&identity(trackable))
            .filter(|entry| entry.is_live())
            .map(|entry| entry.label.as_str())
    }

    /// Remove and return the label of a trackable
    pub fn take_label(&mut self, trackable: &TrackableRef) -> Option<String> {
        self.labels
            .remove(&identity(trackable))
            .filter(WeakLabel::is_live)
            .map(|entry| entry.label)
    }

    /// Drop label entries whose trackable no longer exists
    pub fn prune(&mut self) {
        self.labels.retain(|_, entry| entry.is_live());
    }
}
