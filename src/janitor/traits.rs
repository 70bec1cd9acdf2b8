//! Capability interfaces for everything a janitor can track
//!
//! A trackable is classified by the capabilities it exposes, never by its
//! concrete type. Every capability defaults to "absent"; an implementor opts in
//! to the ones it supports by returning `Some(self)` (or a snapshot).

use super::error::TeardownResult;
use crate::scene::SceneObject;
use std::rc::Rc;

/// Shared handle to a trackable; identity is the allocation it points to
pub type TrackableRef = Rc<dyn Trackable>;

/// Anything with a zero-argument teardown
pub trait Disposable {
    fn dispose(&self) -> TeardownResult;
}

/// Anything that can detach itself from whatever owns it (DOM-like nodes)
pub trait Removable {
    fn remove(&self) -> TeardownResult;
}

impl<T: Disposable + ?Sized> Disposable for Rc<T> {
    fn dispose(&self) -> TeardownResult {
        (**self).dispose()
    }
}

impl<T: Removable + ?Sized> Removable for Rc<T> {
    fn remove(&self) -> TeardownResult {
        (**self).remove()
    }
}

pub trait Trackable {
    /// Human-readable name, reported at verbose level when present
    fn name(&self) -> Option<String> {
        None
    }

    fn as_scene_object(&self) -> Option<&dyn SceneObject> {
        None
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }

    /// The value itself as a teardown procedure
    fn as_callback(&self) -> Option<&dyn Fn() -> TeardownResult> {
        None
    }

    fn as_removable(&self) -> Option<&dyn Removable> {
        None
    }

    /// Snapshot of the elements of a collection-like trackable
    fn elements(&self) -> Option<Vec<TrackableRef>> {
        None
    }
}
