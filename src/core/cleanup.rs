//! Generic Cleanup Interface
//!
//! Lets owners trigger teardown of whatever they hold without knowing how the
//! held resources are tracked. `Janitor` implements it by running a registry
//! disposal pass.

/// Generic trait for cleanup operations
pub trait Cleanup {
    /// Tear down all resources managed by this instance
    fn cleanup(&self);
}
