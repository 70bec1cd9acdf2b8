//! Default scene-object disposer
//!
//! Releases the resources a node references through its materials and geometry.
//! Failures are reported through the log handed in and never returned.

use super::traits::{Material, SceneObject};
use crate::diagnostics::Diagnostics;
use crate::janitor::error::TeardownResult;

/// Frees the GPU-bound resources referenced by a scene object
pub trait SceneDisposer {
    fn dispose_scene_object(&self, node: &dyn SceneObject, log: &Diagnostics);
}

/// Disposes textures, uniform textures and materials, then the geometry
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshDisposer;

impl MeshDisposer {
    fn dispose_material(material: &dyn Material, log: &Diagnostics) -> TeardownResult {
        for texture in material.textures() {
            texture.dispose()?;
        }
        for texture in material.uniform_textures() {
            texture.dispose()?;
        }
        material.dispose()?;
        log.debug(format_args!("material {}", material.name()));
        Ok(())
    }
}

impl SceneDisposer for MeshDisposer {
    fn dispose_scene_object(&self, node: &dyn SceneObject, log: &Diagnostics) {
        if let Some(materials) = node.materials() {
            // One failing material abandons the rest of the list.
            let disposed = materials
                .iter()
                .try_for_each(|material| Self::dispose_material(material.as_ref(), log));
            if let Err(e) = disposed {
                log.error(format_args!("error disposing material of '{}': {}", node.name(), e));
            }
        }

        if let Some(geometry) = node.geometry() {
            match geometry.dispose() {
                Ok(()) => {
                    log.debug(format_args!("geometry {}", geometry.name()));
                    node.clear_geometry();
                }
                Err(e) => {
                    log.error(format_args!("error disposing geometry of '{}': {}", node.name(), e));
                }
            }
        }
    }
}
