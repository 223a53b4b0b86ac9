//! Wait-handler delegate for embedders that tick scripts across host
//! frames.
//!
//! The wait type and parameter are opaque to the VM; they are whatever the
//! suspending host function passed to [`crate::instance::ScriptInstance::wait`].
//! Timeouts and cancellation are entirely the handler's business: a host
//! function records its deadline in the wait parameter, and the handler's
//! `update` resumes or terminates as it sees fit. The VM provides no
//! implicit timer.

use crate::instance::ScriptInstance;
use crate::value::Value;

/// Advances a WAITING instance.
pub trait WaitHandler {
    /// Returns `true` when the waiting instance may continue. Called once
    /// per `update()` while the instance is WAITING; when it reports true
    /// the instance is resumed.
    fn can_continue(&self, wait_type: &Value, wait_parameter: &Value) -> bool;

    /// Called once per `update()` while the instance stays WAITING. May
    /// resume or terminate the instance.
    fn update(&self, instance: &mut ScriptInstance, wait_type: &Value, wait_parameter: &Value) {
        let _ = (instance, wait_type, wait_parameter);
    }
}
