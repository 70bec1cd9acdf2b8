//! Janitor unit tests
//!
//! Organised by concern:
//! - `classification` - capability classification and priority order
//! - `dispatch` - recursion, counting, failure containment and logging
//! - `lifecycle` - registry passes, persistence, labels, ad-hoc disposal and trash


use super::error::{TeardownError, TeardownResult};
use super::traits::{Disposable, Removable, TrackableRef};
use super::types::{disposable, fallible, removable};
use crate::diagnostics::MemorySink;
use crate::janitor::api::Janitor;
use std::cell::Cell;
use std::rc::Rc;

/// Counts teardown invocations; optionally fails every time
#[derive(Debug, Default)]
pub(super) struct Probe {
    calls: Cell<usize>,
    fail: bool,
}

impl Probe {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn failing() -> Rc<Self> {
        Rc::new(Self {
            calls: Cell::new(0),
            fail: true,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn hit(&self) -> TeardownResult {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(TeardownError::failed("teardown", "probe refused"));
        }
        Ok(())
    }
}

impl Disposable for Probe {
    fn dispose(&self) -> TeardownResult {
        self.hit()
    }
}

impl Removable for Probe {
    fn remove(&self) -> TeardownResult {
        self.hit()
    }
}

/// Trackable that invokes `probe` as a callback
pub(super) fn callback_for(probe: &Rc<Probe>) -> TrackableRef {
    let probe = Rc::clone(probe);
    fallible(move || probe.hit())
}

/// Trackable that invokes `probe` through `Disposable`
pub(super) fn disposable_for(probe: &Rc<Probe>) -> TrackableRef {
    disposable(Rc::clone(probe))
}

/// Trackable that invokes `probe` through `Removable`
pub(super) fn removable_for(probe: &Rc<Probe>) -> TrackableRef {
    removable(Rc::clone(probe))
}

/// Janitor reporting into a fresh `MemorySink`
pub(super) fn recording_janitor(persistent: bool) -> (Janitor, Rc<MemorySink>) {
    let sink = Rc::new(MemorySink::new());
    let janitor = Janitor::builder()
        .label("test")
        .persistent(persistent)
        .sink(sink.clone())
        .build();
    (janitor, sink)
}
