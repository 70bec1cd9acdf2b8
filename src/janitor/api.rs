//! Janitor API
//!
//! The public face of the disposal engine: register trackables with `mop`,
//! tear them down with `dispose`, or dispose an ad-hoc batch that never touches
//! the registry.
//!
//! # Caller obligations
//! - Disposal is single-threaded and synchronous; a `Janitor` is neither `Send`
//!   nor `Sync`.
//! - Trackables may `mop` into the janitor that is disposing them, but in a
//!   non-persistent janitor those late arrivals are cleared with the rest of the
//!   registry when the pass ends.
//! - There is no cycle detection. A trackable that reaches one of its ancestors
//!   again (a collection containing itself, a child janitor tracking its parent)
//!   recurses until the stack is exhausted.

use super::classify::NodeKinds;
use super::dispatcher::Dispatcher;
use super::error::TeardownResult;
use super::registry::Registry;
use super::traits::{Disposable, Trackable, TrackableRef};
use crate::core::cleanup::Cleanup;
use crate::core::config::{JanitorConfig, DEFAULT_ADHOC_GLYPH, DEFAULT_REGISTRY_GLYPH};
use crate::diagnostics::{Diagnostics, DiagnosticsSink, LogSink, DEFAULT_INDENT_MARKER};
use crate::scene::{MeshDisposer, SceneDisposer};
use std::cell::RefCell;
use std::rc::Rc;

/// Label used in banners when a janitor was not given one
pub const DEFAULT_LABEL: &str = "Janitor";

/// Tracks resources and tears them down on demand
pub struct Janitor {
    label: Option<String>,
    persistent: bool,
    registry: RefCell<Registry>,
    diagnostics: Diagnostics,
    scene_disposer: Rc<dyn SceneDisposer>,
    node_kinds: NodeKinds,
    registry_glyph: String,
    adhoc_glyph: String,
}

impl std::fmt::Debug for Janitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Janitor")
            .field("label", &self.label)
            .field("persistent", &self.persistent)
            .field("tracked", &self.registry.try_borrow().map(|r| r.len()).ok())
            .finish_non_exhaustive()
    }
}

impl Default for Janitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Janitor {
    /// Non-persistent, unlabelled janitor reporting through `log`
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Janitor whose registry survives disposal passes
    pub fn persistent() -> Self {
        Self::builder().persistent(true).build()
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self::builder().label(label).build()
    }

    pub fn builder() -> JanitorBuilder {
        JanitorBuilder::default()
    }

    /// Label shown in banners
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.borrow().is_empty()
    }

    pub fn contains(&self, trackable: &TrackableRef) -> bool {
        self.registry.borrow().contains(trackable)
    }

    /// Track a trackable and hand it back unchanged
    ///
    /// Nothing about its shape is checked here; a value no teardown applies to
    /// is reported when it is disposed.
    pub fn mop(&self, trackable: TrackableRef) -> TrackableRef {
        self.registry.borrow_mut().insert(trackable.clone());
        trackable
    }

    /// Track a trackable under a label reported when it is disposed
    pub fn mop_labeled(&self, trackable: TrackableRef, label: impl Into<String>) -> TrackableRef {
        let trackable = self.mop(trackable);
        self.registry.borrow_mut().set_label(&trackable, label);
        trackable
    }

    /// Label still waiting to be reported for `trackable`
    pub fn label_of(&self, trackable: &TrackableRef) -> Option<String> {
        self.registry
            .borrow()
            .label_of(trackable)
            .map(str::to_string)
    }

    /// Dispose everything in the registry; returns the number of units disposed
    ///
    /// The registry is cleared afterwards unless the janitor is persistent.
    pub fn dispose(&self) -> usize {
        self.dispose_registry()
    }

    /// Dispose exactly `targets`, leaving the registry untouched
    pub fn dispose_these(&self, targets: &[TrackableRef]) -> usize {
        self.run_pass(&self.adhoc_glyph, targets)
    }

    /// One-shot disposal without keeping anything around
    ///
    /// A label as first argument names the throwaway janitor; a trackable as
    /// first argument is disposed ahead of `rest`.
    pub fn trash<I>(first: impl Into<TrashTarget>, rest: I) -> usize
    where
        I: IntoIterator<Item = TrackableRef>,
    {
        match first.into() {
            TrashTarget::Label(label) => {
                let targets: Vec<TrackableRef> = rest.into_iter().collect();
                Janitor::with_label(label).dispose_these(&targets)
            }
            TrashTarget::Trackable(head) => {
                let targets: Vec<TrackableRef> = std::iter::once(head).chain(rest).collect();
                Janitor::new().dispose_these(&targets)
            }
        }
    }

    fn dispose_registry(&self) -> usize {
        let snapshot = self.registry.borrow().snapshot();
        let disposed = self.run_pass(&self.registry_glyph, &snapshot);
        if !self.persistent {
            self.registry.borrow_mut().clear();
        }
        disposed
    }

    fn run_pass(&self, glyph: &str, targets: &[TrackableRef]) -> usize {
        if targets.is_empty() {
            return 0;
        }

        self.diagnostics.info(format_args!(
            "{} {} ({} trackables)",
            glyph,
            self.label(),
            targets.len()
        ));
        let disposed = self.dispatcher().dispose_nested(targets);
        self.diagnostics.info(format_args!(
            "{} {} disposed {} units",
            glyph,
            self.label(),
            disposed
        ));
        disposed
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher {
            registry: &self.registry,
            diagnostics: &self.diagnostics,
            scene_disposer: &*self.scene_disposer,
            node_kinds: &self.node_kinds,
        }
    }
}

/// Janitors nest: a janitor tracked by another is disposed with it
impl Disposable for Janitor {
    fn dispose(&self) -> TeardownResult {
        self.dispose_registry();
        Ok(())
    }
}

impl Trackable for Janitor {
    fn name(&self) -> Option<String> {
        self.label.clone()
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl Cleanup for Janitor {
    fn cleanup(&self) {
        self.dispose_registry();
    }
}

/// First argument of [`Janitor::trash`]
pub enum TrashTarget {
    Label(String),
    Trackable(TrackableRef),
}

impl From<&str> for TrashTarget {
    fn from(label: &str) -> Self {
        TrashTarget::Label(label.to_string())
    }
}

impl From<String> for TrashTarget {
    fn from(label: String) -> Self {
        TrashTarget::Label(label)
    }
}

impl From<TrackableRef> for TrashTarget {
    fn from(trackable: TrackableRef) -> Self {
        TrashTarget::Trackable(trackable)
    }
}

/// Dispose a label-or-trackable followed by any number of trackables
///
/// ```
/// use janitor::janitor::types::callback;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let calls = Rc::new(Cell::new(0));
/// let counter = calls.clone();
/// janitor::trash!("overlay", callback(move || counter.set(counter.get() + 1)));
/// assert_eq!(calls.get(), 1);
/// ```
#[macro_export]
macro_rules! trash {
    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let rest: ::std::vec::Vec<$crate::janitor::traits::TrackableRef> = ::std::vec![$($rest),*];
        $crate::janitor::api::Janitor::trash($first, rest)
    }};
}

pub struct JanitorBuilder {
    label: Option<String>,
    persistent: bool,
    sink: Option<Rc<dyn DiagnosticsSink>>,
    scene_disposer: Option<Rc<dyn SceneDisposer>>,
    indent_marker: String,
    registry_glyph: String,
    adhoc_glyph: String,
    node_kinds: Vec<String>,
}

impl Default for JanitorBuilder {
    fn default() -> Self {
        Self {
            label: None,
            persistent: false,
            sink: None,
            scene_disposer: None,
            indent_marker: DEFAULT_INDENT_MARKER.to_string(),
            registry_glyph: DEFAULT_REGISTRY_GLYPH.to_string(),
            adhoc_glyph: DEFAULT_ADHOC_GLYPH.to_string(),
            node_kinds: Vec::new(),
        }
    }
}

impl JanitorBuilder {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Keep the registry after `dispose()`; fixed for the janitor's lifetime
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    pub fn sink(mut self, sink: Rc<dyn DiagnosticsSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn scene_disposer(mut self, disposer: Rc<dyn SceneDisposer>) -> Self {
        self.scene_disposer = Some(disposer);
        self
    }

    pub fn indent_marker(mut self, marker: impl Into<String>) -> Self {
        self.indent_marker = marker.into();
        self
    }

    pub fn glyphs(mut self, registry: impl Into<String>, adhoc: impl Into<String>) -> Self {
        self.registry_glyph = registry.into();
        self.adhoc_glyph = adhoc.into();
        self
    }

    pub fn scene_node_kind(mut self, kind: impl Into<String>) -> Self {
        self.node_kinds.push(kind.into());
        self
    }

    /// Take glyphs, indent marker and extra node kinds from a loaded config
    pub fn config(mut self, config: &JanitorConfig) -> Self {
        self.indent_marker = config.indent_marker.clone();
        self.registry_glyph = config.registry_glyph.clone();
        self.adhoc_glyph = config.adhoc_glyph.clone();
        self.node_kinds.extend(config.scene_node_kinds.iter().cloned());
        self
    }

    pub fn build(self) -> Janitor {
        let sink = self.sink.unwrap_or_else(|| Rc::new(LogSink));
        Janitor {
            label: self.label,
            persistent: self.persistent,
            registry: RefCell::new(Registry::new()),
            diagnostics: Diagnostics::new(sink).with_marker(&self.indent_marker),
            scene_disposer: self.scene_disposer.unwrap_or_else(|| Rc::new(MeshDisposer)),
            node_kinds: NodeKinds::with_extra(self.node_kinds),
            registry_glyph: self.registry_glyph,
            adhoc_glyph: self.adhoc_glyph,
        }
    }
}
