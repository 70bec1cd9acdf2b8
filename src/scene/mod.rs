//! Scene-object support
//!
//! Capability traits for scene-graph nodes, the disposer that frees the
//! resources they reference, and a ready-made [`SceneNode`].

pub mod disposer;
pub mod node;
pub mod traits;

pub use disposer::{MeshDisposer, SceneDisposer};
pub use node::{SceneNode, SceneNodeBuilder};
pub use traits::{Geometry, Material, SceneObject, TextureRef};

#[cfg(test)]
mod tests;
