//! Ready-made scene node

use super::traits::{Geometry, Material, SceneObject};
use crate::janitor::error::TeardownResult;
use crate::janitor::traits::{Disposable, Trackable, TrackableRef};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A scene-graph node owning materials, a geometry and child trackables
///
/// `clear()` detaches every child. An optional own teardown makes the node
/// `Disposable` as well, so disposal runs both the scene disposer and it.
pub struct SceneNode {
    name: String,
    kind: String,
    materials: Option<Vec<Rc<dyn Material>>>,
    geometry: RefCell<Option<Rc<dyn Geometry>>>,
    children: RefCell<Vec<TrackableRef>>,
    teardown: Option<Box<dyn Fn() -> TeardownResult>>,
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("children", &self.children.borrow().len())
            .field("has_geometry", &self.geometry.borrow().is_some())
            .finish()
    }
}

impl SceneNode {
    pub fn builder(kind: impl Into<String>) -> SceneNodeBuilder {
        SceneNodeBuilder {
            kind: kind.into(),
            name: String::new(),
            materials: None,
            geometry: None,
            children: Vec::new(),
            teardown: None,
        }
    }

    pub fn add(&self, child: TrackableRef) {
        self.children.borrow_mut().push(child);
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// Whether the node still references its geometry
    pub fn holds_geometry(&self) -> bool {
        self.geometry.borrow().is_some()
    }
}

pub struct SceneNodeBuilder {
    kind: String,
    name: String,
    materials: Option<Vec<Rc<dyn Material>>>,
    geometry: Option<Rc<dyn Geometry>>,
    children: Vec<TrackableRef>,
    teardown: Option<Box<dyn Fn() -> TeardownResult>>,
}

impl SceneNodeBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn material(mut self, material: Rc<dyn Material>) -> Self {
        self.materials.get_or_insert_with(Vec::new).push(material);
        self
    }

    pub fn geometry(mut self, geometry: Rc<dyn Geometry>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn child(mut self, child: TrackableRef) -> Self {
        self.children.push(child);
        self
    }

    pub fn teardown<F>(mut self, f: F) -> Self
    where
        F: Fn() -> TeardownResult + 'static,
    {
        self.teardown = Some(Box::new(f));
        self
    }

    pub fn build(self) -> Rc<SceneNode> {
        Rc::new(SceneNode {
            name: self.name,
            kind: self.kind,
            materials: self.materials,
            geometry: RefCell::new(self.geometry),
            children: RefCell::new(self.children),
            teardown: self.teardown,
        })
    }
}

impl SceneObject for SceneNode {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn kind(&self) -> String {
        self.kind.clone()
    }

    fn materials(&self) -> Option<Vec<Rc<dyn Material>>> {
        self.materials.clone()
    }

    fn geometry(&self) -> Option<Rc<dyn Geometry>> {
        self.geometry.borrow().clone()
    }

    fn clear_geometry(&self) {
        self.geometry.borrow_mut().take();
    }

    fn children(&self) -> Option<Vec<TrackableRef>> {
        Some(self.children.borrow().clone())
    }

    fn clear(&self) -> Option<TeardownResult> {
        self.children.borrow_mut().clear();
        Some(Ok(()))
    }

    fn has_material(&self) -> bool {
        self.materials.is_some()
    }

    fn has_geometry(&self) -> bool {
        self.geometry.borrow().is_some()
    }

    fn has_children(&self) -> bool {
        true
    }
}

impl Disposable for SceneNode {
    fn dispose(&self) -> TeardownResult {
        match &self.teardown {
            Some(teardown) => teardown(),
            None => Ok(()),
        }
    }
}

impl Trackable for SceneNode {
    fn name(&self) -> Option<String> {
        (!self.name.is_empty()).then(|| self.name.clone())
    }

    fn as_scene_object(&self) -> Option<&dyn SceneObject> {
        Some(self)
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        self.teardown.as_ref().map(|_| self as &dyn Disposable)
    }
}
