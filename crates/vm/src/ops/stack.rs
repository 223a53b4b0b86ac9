//! Stack-primitive instructions: literals, locals, and outer scopes.

use crate::error::VmResult;
use crate::instance::ScriptInstance;
use crate::instruction::Literal;
use crate::value::Value;

pub(super) fn push_literal(instance: &mut ScriptInstance, literal: &Literal) -> VmResult<bool> {
    instance.push(literal.to_value())?;
    Ok(true)
}

pub(super) fn push_null(instance: &mut ScriptInstance) -> VmResult<bool> {
    instance.push(Value::Null)?;
    Ok(true)
}

pub(super) fn push_variable(instance: &mut ScriptInstance, name: &str) -> VmResult<bool> {
    let value = instance.get_value(name)?.unwrap_or(Value::Null);
    instance.push(value)?;
    Ok(true)
}

pub(super) fn push_scope_variable(
    instance: &mut ScriptInstance,
    scope: &str,
    name: &str,
) -> VmResult<bool> {
    let value = instance
        .scope_resolver()
        .and_then(|resolver| resolver.get_scope(scope))
        .and_then(|scope| scope.get(name))
        .unwrap_or(Value::Null);
    instance.push(value)?;
    Ok(true)
}

pub(super) fn pop(instance: &mut ScriptInstance) -> VmResult<bool> {
    instance.pop()?;
    Ok(true)
}

pub(super) fn pop_variable(instance: &mut ScriptInstance, name: &str) -> VmResult<bool> {
    let value = instance.pop()?;
    instance.set_value(name, value)?;
    Ok(true)
}

pub(super) fn pop_scope_variable(
    instance: &mut ScriptInstance,
    scope: &str,
    name: &str,
) -> VmResult<bool> {
    let value = instance.pop()?;
    let resolved = instance
        .scope_resolver()
        .and_then(|resolver| resolver.get_scope(scope));
    match resolved {
        // Writes to read-only names are silently ignored by the scope.
        Some(target) => target.set(name, value),
        // The popped value is discarded; NULL marks the failed lookup.
        None => instance.push(Value::Null)?,
    }
    Ok(true)
}

pub(super) fn set(
    instance: &mut ScriptInstance,
    name: &str,
    literal: &Literal,
) -> VmResult<bool> {
    instance.set_value(name, literal.to_value())?;
    Ok(true)
}

pub(super) fn set_variable(
    instance: &mut ScriptInstance,
    dest: &str,
    source: &str,
) -> VmResult<bool> {
    let value = instance.get_value(source)?.unwrap_or(Value::Null);
    instance.set_value(dest, value)?;
    Ok(true)
}
