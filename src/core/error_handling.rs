//! Generic error handling utilities
//!
//! Provides unified error reporting that works across the crate's error types
//! while keeping each domain's own wording for failures.

/// Trait for errors that can distinguish between caller-actionable and system errors
///
/// Caller-actionable errors carry a message that is specific enough to show as-is
/// (a teardown that reported exactly what went wrong, a config value that failed
/// validation). Everything else is described through the operation that failed,
/// with the full error attached.
///
/// # Implementation Consistency
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`. When it returns `false`, `user_message()` should return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error contains a specific message that should be
    /// displayed directly
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific message if this is a caller-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Render an error together with the operation it interrupted
///
/// Caller-actionable errors contribute their own message, system errors their
/// full `Display` text.
///
/// # Examples
/// ```
/// use janitor::core::error_handling::describe_error_with_context;
/// use janitor::janitor::error::TeardownError;
///
/// let error = TeardownError::failed("dispose", "buffer already released");
/// let line = describe_error_with_context(&error, "disposing 'hud'");
/// assert_eq!(line, "disposing 'hud': buffer already released");
/// ```
pub fn describe_error_with_context<E: ContextualError>(error: &E, operation_context: &str) -> String {
    match error.user_message().filter(|_| error.is_user_actionable()) {
        Some(user_msg) => format!("{}: {}", operation_context, user_msg),
        None => format!("{}: {}", operation_context, error),
    }
}

/// Log an error through the `log` facade with the same wording as
/// [`describe_error_with_context`], keeping the debug representation at debug level.
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("{}", describe_error_with_context(error, operation_context));
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
