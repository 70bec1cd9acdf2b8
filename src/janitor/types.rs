//! Ready-made trackables
//!
//! Adapters that give plain closures, `Disposable`/`Removable` values and
//! collections a `Trackable` face, plus constructor helpers returning
//! [`TrackableRef`] handles ready for `mop`.

use super::error::TeardownResult;
use super::traits::{Disposable, Removable, Trackable, TrackableRef};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// A zero-argument procedure that is its own teardown
pub struct Callback {
    teardown: Box<dyn Fn() -> TeardownResult>,
}

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self::fallible(move || {
            f();
            Ok(())
        })
    }

    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn() -> TeardownResult + 'static,
    {
        Self {
            teardown: Box::new(f),
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

impl Trackable for Callback {
    fn as_callback(&self) -> Option<&dyn Fn() -> TeardownResult> {
        Some(&*self.teardown)
    }
}

/// Wraps a [`Disposable`] value, optionally with a name for diagnostics
#[derive(Debug)]
pub struct DisposableHandle<T> {
    inner: T,
    name: Option<String>,
}

impl<T: Disposable> DisposableHandle<T> {
    pub fn new(inner: T) -> Self {
        Self { inner, name: None }
    }

    pub fn named(name: impl Into<String>, inner: T) -> Self {
        Self {
            inner,
            name: Some(name.into()),
        }
    }

    pub fn get(&self) -> &T {
        &self.inner
    }
}

impl<T: Disposable> Trackable for DisposableHandle<T> {
    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(&self.inner)
    }
}

/// Wraps a [`Removable`] value
#[derive(Debug)]
pub struct RemovableHandle<T> {
    inner: T,
}

impl<T: Removable> RemovableHandle<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn get(&self) -> &T {
        &self.inner
    }
}

impl<T: Removable> Trackable for RemovableHandle<T> {
    fn as_removable(&self) -> Option<&dyn Removable> {
        Some(&self.inner)
    }
}

/// A value with no capability at all; accepted by `mop`, rejected when disposed
#[derive(Debug)]
pub struct Opaque<T>(pub T);

impl<T> Trackable for Opaque<T> {}

impl Trackable for Vec<TrackableRef> {
    fn elements(&self) -> Option<Vec<TrackableRef>> {
        Some(self.clone())
    }
}

impl Trackable for VecDeque<TrackableRef> {
    fn elements(&self) -> Option<Vec<TrackableRef>> {
        Some(self.iter().cloned().collect())
    }
}

impl<const N: usize> Trackable for [TrackableRef; N] {
    fn elements(&self) -> Option<Vec<TrackableRef>> {
        Some(self.to_vec())
    }
}

/// A collection that may still grow after it has been tracked
impl Trackable for RefCell<Vec<TrackableRef>> {
    fn elements(&self) -> Option<Vec<TrackableRef>> {
        Some(self.borrow().clone())
    }
}

pub fn callback<F>(f: F) -> TrackableRef
where
    F: Fn() + 'static,
{
    Rc::new(Callback::new(f))
}

pub fn fallible<F>(f: F) -> TrackableRef
where
    F: Fn() -> TeardownResult + 'static,
{
    Rc::new(Callback::fallible(f))
}

pub fn disposable<T: Disposable + 'static>(value: T) -> TrackableRef {
    Rc::new(DisposableHandle::new(value))
}

pub fn named_disposable<T: Disposable + 'static>(name: impl Into<String>, value: T) -> TrackableRef {
    Rc::new(DisposableHandle::named(name, value))
}

pub fn removable<T: Removable + 'static>(value: T) -> TrackableRef {
    Rc::new(RemovableHandle::new(value))
}

pub fn collection<I>(items: I) -> TrackableRef
where
    I: IntoIterator<Item = TrackableRef>,
{
    Rc::new(items.into_iter().collect::<Vec<_>>())
}

pub fn opaque<T: 'static>(value: T) -> TrackableRef {
    Rc::new(Opaque(value))
}
