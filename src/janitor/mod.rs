//! Janitor: registry and recursive disposal engine
//!
//! # Module Structure
//! - [`api`]: the `Janitor` facade, builder and `trash` convenience
//! - [`traits`]: capability interfaces a trackable opts into
//! - [`types`]: adapters and helpers producing trackables
//! - [`classify`]: pure classification driving dispatch
//! - [`registry`]: identity set plus weak labels
//! - [`error`]: teardown failures

pub mod api;
pub mod classify;
mod dispatcher;
pub mod error;
pub mod registry;
pub mod traits;
pub mod types;

pub use api::{Janitor, JanitorBuilder, TrashTarget};
pub use error::{TeardownError, TeardownResult};
pub use traits::{Disposable, Removable, Trackable, TrackableRef};

#[cfg(test)]
mod tests;
