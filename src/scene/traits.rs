//! Scene-graph capabilities
//!
//! A scene object is a graph node that may own GPU-side resources through a
//! material (or list of materials) and a geometry, and may parent other
//! trackables. Implementations typically keep their state behind `RefCell`s,
//! since disposal only ever holds shared references.

use crate::janitor::error::TeardownResult;
use crate::janitor::traits::{Disposable, TrackableRef};
use std::rc::Rc;

/// A texture, buffer or other leaf resource referenced by a material
pub type TextureRef = Rc<dyn Disposable>;

pub trait Material: Disposable {
    fn name(&self) -> String {
        String::new()
    }

    /// Textures referenced directly on the material (map, normalMap, ...)
    fn textures(&self) -> Vec<TextureRef> {
        Vec::new()
    }

    /// Textures found among the values of the material's uniform table
    fn uniform_textures(&self) -> Vec<TextureRef> {
        Vec::new()
    }
}

pub trait Geometry: Disposable {
    fn name(&self) -> String {
        String::new()
    }
}

pub trait SceneObject {
    fn name(&self) -> String;

    /// Node kind such as `Mesh`, `Group` or `Object3D`
    fn kind(&self) -> String;

    /// `None` when the node has no material slot; a single material is a
    /// one-element list
    fn materials(&self) -> Option<Vec<Rc<dyn Material>>> {
        None
    }

    fn geometry(&self) -> Option<Rc<dyn Geometry>> {
        None
    }

    /// Drop the node's reference to its geometry
    fn clear_geometry(&self) {}

    /// Snapshot of the node's children; `None` when it cannot parent anything
    fn children(&self) -> Option<Vec<TrackableRef>> {
        None
    }

    /// Detach every child; `None` when the node has no such operation
    fn clear(&self) -> Option<TeardownResult> {
        None
    }

    fn has_material(&self) -> bool {
        self.materials().is_some()
    }

    fn has_geometry(&self) -> bool {
        self.geometry().is_some()
    }

    fn has_children(&self) -> bool {
        self.children().is_some()
    }
}
