//! Tests for the default scene-object disposer

use super::*;
use crate::diagnostics::{set_verbosity, Diagnostics, MemorySink, MessageLevel, Verbosity};
use crate::janitor::error::{TeardownError, TeardownResult};
use crate::janitor::traits::Disposable;
use serial_test::serial;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct Counted {
    calls: Cell<usize>,
    fail: bool,
}

impl Counted {
    fn failing() -> Self {
        Self {
            calls: Cell::new(0),
            fail: true,
        }
    }

    fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Disposable for Counted {
    fn dispose(&self) -> TeardownResult {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(TeardownError::failed("dispose", "resource busy"));
        }
        Ok(())
    }
}

struct Tagged {
    tag: &'static str,
    order: Rc<RefCell<Vec<&'static str>>>,
}

impl Tagged {
    fn new(tag: &'static str, order: &Rc<RefCell<Vec<&'static str>>>) -> Self {
        Self {
            tag,
            order: order.clone(),
        }
    }
}

impl Disposable for Tagged {
    fn dispose(&self) -> TeardownResult {
        self.order.borrow_mut().push(self.tag);
        Ok(())
    }
}

#[derive(Default)]
struct TestMaterial {
    own: Counted,
    textures: Vec<TextureRef>,
    uniforms: Vec<TextureRef>,
    order: Option<Rc<RefCell<Vec<&'static str>>>>,
}

impl Disposable for TestMaterial {
    fn dispose(&self) -> TeardownResult {
        if let Some(order) = &self.order {
            order.borrow_mut().push("material");
        }
        self.own.dispose()
    }
}

impl Material for TestMaterial {
    fn name(&self) -> String {
        "standard".to_string()
    }

    fn textures(&self) -> Vec<TextureRef> {
        self.textures.clone()
    }

    fn uniform_textures(&self) -> Vec<TextureRef> {
        self.uniforms.clone()
    }
}

#[derive(Default)]
struct TestGeometry {
    own: Counted,
}

impl Disposable for TestGeometry {
    fn dispose(&self) -> TeardownResult {
        self.own.dispose()
    }
}

impl Geometry for TestGeometry {
    fn name(&self) -> String {
        "box".to_string()
    }
}

fn recording() -> (Rc<MemorySink>, Diagnostics) {
    let sink = Rc::new(MemorySink::new());
    let diagnostics = Diagnostics::new(sink.clone()).tagged(MessageLevel::Debug);
    (sink, diagnostics)
}

#[test]
fn test_disposes_geometry_and_clears_reference() {
    let geometry = Rc::new(TestGeometry::default());
    let node = SceneNode::builder("Mesh").geometry(geometry.clone()).build();
    let (_sink, log) = recording();

    MeshDisposer.dispose_scene_object(&*node, &log);

    assert_eq!(geometry.own.calls(), 1);
    assert!(!node.holds_geometry());
}

#[test]
fn test_disposes_every_material_in_list() {
    let first = Rc::new(TestMaterial::default());
    let second = Rc::new(TestMaterial::default());
    let node = SceneNode::builder("Mesh")
        .material(first.clone())
        .material(second.clone())
        .build();
    let (_sink, log) = recording();

    MeshDisposer.dispose_scene_object(&*node, &log);

    assert_eq!(first.own.calls(), 1);
    assert_eq!(second.own.calls(), 1);
}

#[test]
fn test_disposes_direct_and_uniform_textures_before_material() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let map: TextureRef = Rc::new(Tagged::new("map", &order));
    let normal_map: TextureRef = Rc::new(Tagged::new("normalMap", &order));
    let uniform: TextureRef = Rc::new(Tagged::new("uniform", &order));
    let material = Rc::new(TestMaterial {
        textures: vec![map, normal_map],
        uniforms: vec![uniform],
        order: Some(order.clone()),
        ..Default::default()
    });
    let node = SceneNode::builder("Mesh").material(material.clone()).build();
    let (_sink, log) = recording();

    MeshDisposer.dispose_scene_object(&*node, &log);

    assert_eq!(material.own.calls(), 1);
    assert_eq!(*order.borrow(), vec!["map", "normalMap", "uniform", "material"]);
}

#[test]
#[serial]
fn test_material_failure_is_logged_and_geometry_still_disposed() {
    set_verbosity(Verbosity::Info);
    let broken = Rc::new(TestMaterial {
        own: Counted::failing(),
        ..Default::default()
    });
    let skipped = Rc::new(TestMaterial::default());
    let geometry = Rc::new(TestGeometry::default());
    let node = SceneNode::builder("Mesh")
        .name("floor")
        .material(broken.clone())
        .material(skipped.clone())
        .geometry(geometry.clone())
        .build();
    let (sink, log) = recording();

    MeshDisposer.dispose_scene_object(&*node, &log);

    assert_eq!(broken.own.calls(), 1);
    assert_eq!(skipped.own.calls(), 0);
    assert_eq!(geometry.own.calls(), 1);
    let errors = sink.messages_at(MessageLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("'floor'"), "unexpected error line: {}", errors[0]);
}

#[test]
#[serial]
fn test_geometry_failure_keeps_reference() {
    set_verbosity(Verbosity::Info);
    let geometry = Rc::new(TestGeometry {
        own: Counted::failing(),
    });
    let node = SceneNode::builder("Points").geometry(geometry.clone()).build();
    let (sink, log) = recording();

    MeshDisposer.dispose_scene_object(&*node, &log);

    assert!(node.holds_geometry());
    assert!(sink.has_errors());
}

#[test]
#[serial]
fn test_geometry_name_logged_at_debug() {
    let geometry = Rc::new(TestGeometry::default());
    let node = SceneNode::builder("Mesh").geometry(geometry).build();
    let (sink, log) = recording();

    set_verbosity(Verbosity::Debug);
    MeshDisposer.dispose_scene_object(&*node, &log);
    set_verbosity(Verbosity::Info);

    assert_eq!(sink.messages_at(MessageLevel::Debug), vec!["geometry box"]);
}

#[test]
fn test_clear_detaches_children() {
    let node = SceneNode::builder("Group")
        .child(crate::janitor::types::callback(|| {}))
        .child(crate::janitor::types::callback(|| {}))
        .build();

    assert_eq!(node.child_count(), 2);
    let snapshot = node.children().unwrap();
    assert!(matches!(node.clear(), Some(Ok(()))));
    assert_eq!(node.child_count(), 0);
    assert_eq!(snapshot.len(), 2);
}
