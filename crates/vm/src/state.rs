//! Instance execution states.

use std::fmt;

/// Indicates the lifecycle status of a script instance.
///
/// Transitions are driven by the embedding API (`initialize`, `resume`,
/// `wait`, `suspend`, `terminate`) and by instructions (a RETURN that pops
/// the final activation frame ends the instance).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScriptState {
    /// The instance was constructed but never initialized.
    #[default]
    Created,
    /// The instance was initialized and has not executed yet.
    Init,
    /// The instance is executing.
    Running,
    /// The instance yielded and is waiting on its wait handler.
    Waiting,
    /// The embedder paused the instance.
    Suspended,
    /// The instance finished; registered closeables have been closed.
    Ended,
}

impl ScriptState {
    /// Returns `true` when the instance has ended.
    pub fn is_ended(self) -> bool {
        self == ScriptState::Ended
    }

    /// Returns `true` when the instance is waiting on its wait handler.
    pub fn is_waiting(self) -> bool {
        self == ScriptState::Waiting
    }

    /// Returns `true` when `update()` would execute instructions.
    pub fn is_runnable(self) -> bool {
        matches!(self, ScriptState::Init | ScriptState::Running)
    }
}

impl fmt::Display for ScriptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScriptState::Created => "CREATED",
            ScriptState::Init => "INIT",
            ScriptState::Running => "RUNNING",
            ScriptState::Waiting => "WAITING",
            ScriptState::Suspended => "SUSPENDED",
            ScriptState::Ended => "ENDED",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(ScriptState::Ended.is_ended());
        assert!(!ScriptState::Running.is_ended());
        assert!(ScriptState::Waiting.is_waiting());
        assert!(ScriptState::Init.is_runnable());
        assert!(ScriptState::Running.is_runnable());
        assert!(!ScriptState::Suspended.is_runnable());
    }

    #[test]
    fn test_display() {
        assert_eq!(ScriptState::Created.to_string(), "CREATED");
        assert_eq!(ScriptState::Ended.to_string(), "ENDED");
    }
}
