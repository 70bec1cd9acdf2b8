//! Pure classification of trackables
//!
//! Two independent questions are answered here: whether the value is a scene
//! node (handled by the scene branch before generic dispatch) and which generic
//! teardown applies. The dispatcher branches exhaustively on the answers.

use super::traits::Trackable;

/// Node kinds recognised as scene objects when they expose children
pub const DEFAULT_NODE_KINDS: &[&str] = &[
    "Object3D",
    "Scene",
    "Group",
    "Mesh",
    "InstancedMesh",
    "SkinnedMesh",
    "BatchedMesh",
    "Bone",
    "LOD",
    "Line",
    "LineLoop",
    "LineSegments",
    "Points",
    "Sprite",
    "Camera",
    "PerspectiveCamera",
    "OrthographicCamera",
    "AmbientLight",
    "DirectionalLight",
    "HemisphereLight",
    "PointLight",
    "RectAreaLight",
    "SpotLight",
];

/// Generic teardown, in priority order; the first capability present wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchKind {
    Disposable,
    Callback,
    Removable,
    Collection,
    Unsupported,
}

/// What the value looks like before generic dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeProfile {
    /// Scene node: `kind` and `name` are reported before its resources are freed
    Scene { kind: String, name: String },
    /// Anything else exposing a name
    Named(String),
    Anonymous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub profile: NodeProfile,
    pub kind: DispatchKind,
}

/// Set of node kinds that make a child-bearing object a scene node
#[derive(Debug, Clone, Default)]
pub struct NodeKinds {
    extra: Vec<String>,
}

impl NodeKinds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extra: kinds.into_iter().map(Into::into).collect(),
        }
    }

    pub fn recognizes(&self, kind: &str) -> bool {
        DEFAULT_NODE_KINDS.contains(&kind) || self.extra.iter().any(|k| k == kind)
    }
}

pub fn classify(trackable: &dyn Trackable, kinds: &NodeKinds) -> Classification {
    Classification {
        profile: profile(trackable, kinds),
        kind: dispatch_kind(trackable),
    }
}

fn profile(trackable: &dyn Trackable, kinds: &NodeKinds) -> NodeProfile {
    if let Some(scene) = trackable.as_scene_object() {
        let owns_resources = scene.has_material() && scene.has_geometry();
        let parents_nodes = scene.has_children() && kinds.recognizes(&scene.kind());
        if owns_resources || parents_nodes {
            return NodeProfile::Scene {
                kind: scene.kind(),
                name: scene.name(),
            };
        }
    }

    let name = trackable.name().or_else(|| {
        trackable
            .as_scene_object()
            .map(|scene| scene.name())
            .filter(|name| !name.is_empty())
    });
    match name {
        Some(name) => NodeProfile::Named(name),
        None => NodeProfile::Anonymous,
    }
}

fn dispatch_kind(trackable: &dyn Trackable) -> DispatchKind {
    if trackable.as_disposable().is_some() {
        DispatchKind::Disposable
    } else if trackable.as_callback().is_some() {
        DispatchKind::Callback
    } else if trackable.as_removable().is_some() {
        DispatchKind::Removable
    } else if trackable.elements().is_some() {
        DispatchKind::Collection
    } else {
        DispatchKind::Unsupported
    }
}
