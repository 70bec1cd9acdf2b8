//! Nesting depth shared by every disposal pass on the current thread
//!
//! The counter only drives log indentation. It is entered right before a nested
//! disposal chain starts logging and left when the guard drops, so it is
//! restored on normal return, on a contained teardown failure and on unwinding.

use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Scoped increment of the nesting depth
#[must_use = "the depth is restored as soon as the guard is dropped"]
pub struct DepthGuard {
    // The counter is per thread; the guard must be dropped where it was created.
    _not_send: PhantomData<*const ()>,
}

impl DepthGuard {
    pub fn enter() -> Self {
        DEPTH.with(|depth| depth.set(depth.get() + 1));
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Current nesting depth on this thread
pub fn current_depth() -> usize {
    DEPTH.with(Cell::get)
}

/// Indentation prefix for the current depth: `marker` repeated once per level
/// and a separating space, or nothing at the top level
pub fn indent(marker: &str) -> String {
    match current_depth() {
        0 => String::new(),
        depth => format!("{} ", marker.repeat(depth)),
    }
}
