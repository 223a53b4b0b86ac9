//! Error types for the RookScript VM crate.
//!
//! Execution errors are out-of-band signals to the embedder and terminate the
//! current `update()`; they are never converted into script-visible ERROR
//! values, which travel on the operand stack like any other value.

use thiserror::Error;

/// VM execution errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    /// Activation-frame or operand stack overflow.
    #[error("Stack overflow: maximum depth {max_depth} exceeded")]
    StackOverflow { max_depth: usize },

    /// Operand or frame stack underflow.
    #[error("Stack underflow: attempted to access {requested} items, but only {available} available")]
    StackUnderflow { requested: usize, available: usize },

    /// A jump or call target could not be resolved.
    #[error("Label not found: {label}")]
    UnresolvedLabel { label: String },

    /// An entry point name could not be resolved.
    #[error("Entry point not found: {name}")]
    UnresolvedEntry { name: String },

    /// A host function name could not be resolved.
    #[error("Host function not resolved: {name}")]
    UnresolvedFunction { name: String },

    /// Too many arguments were supplied to an entry point.
    #[error("Bad parameter count for entry {name}: expected at most {expected}, got {actual}")]
    BadParameterCount {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// The per-update command budget was exceeded.
    #[error("Runaway execution: exceeded {limit} commands in one update, possible infinite loop")]
    RunawayExecution { limit: u64 },

    /// `update()` was called on an uninitialized instance.
    #[error("Script not initialized")]
    NotInitialized,

    /// An operation was attempted in a state that does not permit it.
    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },

    /// A host function failed with an unhandled error.
    #[error("Host function {name} failed: {reason}")]
    HostFunctionFailed { name: String, reason: String },

    /// A stack was constructed with a non-positive capacity.
    #[error("Invalid capacity: {what} must be positive")]
    InvalidCapacity { what: &'static str },
}

impl VmError {
    /// Creates a new stack overflow error.
    pub fn stack_overflow(max_depth: usize) -> Self {
        Self::StackOverflow { max_depth }
    }

    /// Creates a new stack underflow error.
    pub fn stack_underflow(requested: usize, available: usize) -> Self {
        Self::StackUnderflow {
            requested,
            available,
        }
    }

    /// Creates a new unresolved label error.
    pub fn unresolved_label<S: Into<String>>(label: S) -> Self {
        Self::UnresolvedLabel {
            label: label.into(),
        }
    }

    /// Creates a new unresolved entry error.
    pub fn unresolved_entry<S: Into<String>>(name: S) -> Self {
        Self::UnresolvedEntry { name: name.into() }
    }

    /// Creates a new unresolved host function error.
    pub fn unresolved_function<S: Into<String>>(name: S) -> Self {
        Self::UnresolvedFunction { name: name.into() }
    }

    /// Creates a new invalid state error.
    pub fn invalid_state<S: Into<String>>(reason: S) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    /// Creates a new host function failure error.
    pub fn host_function_failed<S: Into<String>>(name: S, reason: S) -> Self {
        Self::HostFunctionFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error is a resource limit error.
    pub fn is_resource_limit(&self) -> bool {
        matches!(
            self,
            VmError::StackOverflow { .. } | VmError::RunawayExecution { .. }
        )
    }

    /// Gets the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            VmError::StackOverflow { .. } | VmError::StackUnderflow { .. } => "stack",
            VmError::UnresolvedLabel { .. }
            | VmError::UnresolvedEntry { .. }
            | VmError::UnresolvedFunction { .. } => "resolution",
            VmError::BadParameterCount { .. } => "parameters",
            VmError::RunawayExecution { .. } => "runaway",
            VmError::NotInitialized | VmError::InvalidState { .. } => "state",
            VmError::HostFunctionFailed { .. } => "host",
            VmError::InvalidCapacity { .. } => "capacity",
        }
    }
}

/// Result type for VM operations.
pub type VmResult<T> = std::result::Result<T, VmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = VmError::unresolved_label("entry_main");
        assert_eq!(error.to_string(), "Label not found: entry_main");

        let error = VmError::stack_underflow(2, 0);
        assert_eq!(
            error.to_string(),
            "Stack underflow: attempted to access 2 items, but only 0 available"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(VmError::stack_overflow(256).category(), "stack");
        assert_eq!(VmError::unresolved_function("fn").category(), "resolution");
        assert_eq!(VmError::RunawayExecution { limit: 1000 }.category(), "runaway");
    }

    #[test]
    fn test_resource_limit_classification() {
        assert!(VmError::stack_overflow(256).is_resource_limit());
        assert!(VmError::RunawayExecution { limit: 10 }.is_resource_limit());
        assert!(!VmError::NotInitialized.is_resource_limit());
    }
}
