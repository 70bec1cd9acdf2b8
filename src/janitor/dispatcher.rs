//! Recursive disposal
//!
//! `dispose_one` consumes a trackable's label, classifies it, runs the scene
//! branch and generic teardown, and recurses into children and elements.
//! A failure, whether an `Err` or a panic, is contained at the frame of the
//! trackable that raised it; siblings and ancestors carry on.

use super::classify::{classify, Classification, DispatchKind, NodeKinds, NodeProfile};
use super::error::{TeardownError, TeardownResult};
use super::registry::Registry;
use super::traits::{Trackable, TrackableRef};
use crate::core::error_handling::describe_error_with_context;
use crate::diagnostics::{DepthGuard, Diagnostics, MessageLevel};
use crate::scene::{SceneDisposer, SceneObject};
use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub(crate) struct Dispatcher<'a> {
    pub registry: &'a RefCell<Registry>,
    pub diagnostics: &'a Diagnostics,
    pub scene_disposer: &'a dyn SceneDisposer,
    pub node_kinds: &'a NodeKinds,
}

impl Dispatcher<'_> {
    /// Dispose a batch one level below the current depth; returns the unit count
    pub fn dispose_nested(&self, trackables: &[TrackableRef]) -> usize {
        trackables
            .iter()
            .map(|trackable| {
                let _depth = DepthGuard::enter();
                self.dispose_one(trackable)
            })
            .sum()
    }

    /// Dispose a single trackable; returns 1 plus the units disposed beneath it
    pub fn dispose_one(&self, trackable: &TrackableRef) -> usize {
        // The label goes before anything can fail.
        let label = self.registry.borrow_mut().take_label(trackable);
        if let Some(label) = &label {
            self.diagnostics.verbose(format_args!("{}", label));
        }

        let classification = classify(&**trackable, self.node_kinds);
        let mut count = 1;
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.teardown(&**trackable, &classification, &mut count)
        }))
        .unwrap_or_else(|payload| Err(TeardownError::panicked(payload)));
        if let Err(error) = outcome {
            let subject = describe_subject(label.as_deref(), &classification);
            self.diagnostics.error(format_args!(
                "{}",
                describe_error_with_context(&error, &format!("error disposing {}", subject))
            ));
            self.diagnostics.debug(format_args!("{:?}", error));
        }
        count
    }

    fn teardown(
        &self,
        trackable: &dyn Trackable,
        classification: &Classification,
        count: &mut usize,
    ) -> TeardownResult {
        let scene = match &classification.profile {
            NodeProfile::Scene { kind, name } => {
                self.diagnostics.verbose(format_args!("{} {}", kind, name));
                trackable.as_scene_object()
            }
            NodeProfile::Named(name) => {
                self.diagnostics.verbose(format_args!("{}", name));
                None
            }
            NodeProfile::Anonymous => None,
        };
        if let Some(scene) = scene {
            *count += self.dispose_scene(scene)?;
        }

        match classification.kind {
            DispatchKind::Disposable => {
                if let Some(disposable) = trackable.as_disposable() {
                    disposable.dispose()?;
                }
            }
            DispatchKind::Callback => {
                if let Some(callback) = trackable.as_callback() {
                    callback()?;
                }
            }
            DispatchKind::Removable => {
                if let Some(removable) = trackable.as_removable() {
                    removable.remove()?;
                }
            }
            DispatchKind::Collection => {
                let elements = trackable.elements().unwrap_or_default();
                *count += self.dispose_nested(&elements);
            }
            // A scene node needs nothing beyond the scene branch.
            DispatchKind::Unsupported if scene.is_some() => {}
            DispatchKind::Unsupported => {
                let subject = describe_subject(None, classification);
                self.diagnostics
                    .warn(format_args!("unsupported type: {}", subject));
            }
        }
        Ok(())
    }

    /// Free the node's resources, detach its children and dispose them
    fn dispose_scene(&self, scene: &dyn SceneObject) -> Result<usize, TeardownError> {
        let scene_log = self.diagnostics.tagged(MessageLevel::Debug);
        self.scene_disposer.dispose_scene_object(scene, &scene_log);

        // Snapshot first: clear() drops the only references to the children.
        let children = scene.children().unwrap_or_default();
        if let Some(cleared) = scene.clear() {
            cleared?;
        }
        Ok(self.dispose_nested(&children))
    }
}

fn describe_subject(label: Option<&str>, classification: &Classification) -> String {
    match (label, &classification.profile) {
        (Some(label), _) => format!("'{}'", label),
        (None, NodeProfile::Scene { kind, name }) if name.is_empty() => kind.clone(),
        (None, NodeProfile::Scene { kind, name }) => format!("{} '{}'", kind, name),
        (None, NodeProfile::Named(name)) => format!("'{}'", name),
        (None, NodeProfile::Anonymous) => match classification.kind {
            DispatchKind::Disposable => "disposable".to_string(),
            DispatchKind::Callback => "callback".to_string(),
            DispatchKind::Removable => "removable".to_string(),
            DispatchKind::Collection => "collection".to_string(),
            DispatchKind::Unsupported => "value".to_string(),
        },
    }
}
