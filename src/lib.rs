//! Deterministic, manually-invoked lifecycle tracking
//!
//! A [`Janitor`] keeps explicitly registered resources (scene nodes holding GPU
//! buffers, disposable handles, teardown callbacks, removable DOM-like nodes and
//! arbitrarily nested collections of these) and tears them all down when asked.
//! Disposal is best effort: every trackable in a batch is attempted, failures are
//! reported through diagnostics, and the number of disposed units is returned.
//!
//! ```
//! use janitor::janitor::types::{callback, collection};
//! use janitor::Janitor;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let calls = Rc::new(Cell::new(0));
//! let janitor = Janitor::with_label("level-1");
//! let counter = calls.clone();
//! janitor.mop(collection([callback(move || counter.set(counter.get() + 1))]));
//!
//! assert_eq!(janitor.dispose(), 2);
//! assert_eq!(calls.get(), 1);
//! assert!(janitor.is_empty());
//! ```

pub mod core;
pub mod diagnostics;
pub mod janitor;
pub mod scene;

pub use crate::janitor::{
    Disposable, Janitor, JanitorBuilder, Removable, TeardownError, TeardownResult, Trackable,
    TrackableRef, TrashTarget,
};
