//! Control-flow instructions: frame discipline, jumps, host dispatch.

use crate::error::{VmError, VmResult};
use crate::instance::ScriptInstance;
use crate::value::Value;

pub(super) fn ret(instance: &mut ScriptInstance) -> VmResult<bool> {
    instance.pop_frame()?;
    if instance.stack().frame_depth() == 0 {
        instance.terminate();
        return Ok(false);
    }
    Ok(true)
}

pub(super) fn call(instance: &mut ScriptInstance, label: &str) -> VmResult<bool> {
    let target = instance.resolve_label(label)?;
    // The command index was already advanced past this instruction; that is
    // the return point.
    let return_index = instance.stack().command_index();
    instance.push_frame(return_index)?;
    instance.stack_mut().set_command_index(target);
    Ok(true)
}

pub(super) fn jump(instance: &mut ScriptInstance, label: &str) -> VmResult<bool> {
    let target = instance.resolve_label(label)?;
    instance.stack_mut().set_command_index(target);
    Ok(true)
}

pub(super) fn jump_branch(
    instance: &mut ScriptInstance,
    true_label: &str,
    false_label: &str,
) -> VmResult<bool> {
    let label = if instance.pop()?.as_boolean() {
        true_label
    } else {
        false_label
    };
    jump(instance, label)
}

pub(super) fn jump_conditional(
    instance: &mut ScriptInstance,
    label: &str,
    jump_when: bool,
) -> VmResult<bool> {
    if instance.pop()?.as_boolean() == jump_when {
        return jump(instance, label);
    }
    Ok(true)
}

pub(super) fn jump_coalesce(instance: &mut ScriptInstance, label: &str) -> VmResult<bool> {
    if instance.peek(0)?.is_null() {
        instance.pop()?;
        return Ok(true);
    }
    jump(instance, label)
}

pub(super) fn call_host(
    instance: &mut ScriptInstance,
    name: &str,
    namespace: Option<&str>,
) -> VmResult<bool> {
    let function = instance.resolve_host_function(name, namespace)?;
    let mut return_value = Value::Null;
    match function.execute(instance, &mut return_value) {
        Ok(keep_running) => {
            // The return value lands on the stack even when the function
            // stops the instance, so a resumed script finds it in place.
            instance.push(return_value)?;
            Ok(keep_running)
        }
        Err(error) => {
            let full_name = match namespace {
                Some(namespace) => format!("{namespace}::{name}"),
                None => name.to_string(),
            };
            Err(VmError::host_function_failed(full_name, error.to_string()))
        }
    }
}
