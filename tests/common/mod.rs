//! Common test utilities and helpers
//!
//! Counting doubles for the trackable capabilities and a janitor wired to a
//! recording sink.

#![allow(dead_code)]

use janitor::diagnostics::MemorySink;
use janitor::janitor::types::{disposable, fallible, removable};
use janitor::{Disposable, Janitor, Removable, TeardownError, TeardownResult, TrackableRef};
use std::cell::Cell;
use std::rc::Rc;

/// Counts how often it is torn down, failing each time if asked to
#[derive(Debug, Default)]
pub struct Counter {
    calls: Cell<usize>,
    fail: bool,
}

impl Counter {
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

    fn bump(&self) -> TeardownResult {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            Err(TeardownError::failed("dispose", "counter refused"))
        } else {
            Ok(())
        }
    }
}

impl Disposable for Counter {
    fn dispose(&self) -> TeardownResult {
        self.bump()
    }
}

impl Removable for Counter {
    fn remove(&self) -> TeardownResult {
        self.bump()
    }
}

pub fn as_callback(counter: &Rc<Counter>) -> TrackableRef {
    let counter = Rc::clone(counter);
    fallible(move || counter.bump())
}

pub fn as_disposable(counter: &Rc<Counter>) -> TrackableRef {
    disposable(Rc::clone(counter))
}

pub fn as_removable(counter: &Rc<Counter>) -> TrackableRef {
    removable(Rc::clone(counter))
}

pub fn recording(persistent: bool) -> (Janitor, Rc<MemorySink>) {
    let sink = Rc::new(MemorySink::new());
    let janitor = Janitor::builder()
        .label("integration")
        .persistent(persistent)
        .sink(sink.clone())
        .build();
    (janitor, sink)
}
