//! List and map instructions.
//!
//! The `*_CONTENTS` variants peek instead of popping (key or index at depth
//! 0, container at depth 1) so compiled accessor chains can walk containers
//! without reloading the root.

use crate::error::VmResult;
use crate::instance::ScriptInstance;
use crate::value::{ListValue, MapValue, Value};

pub(super) fn push_list_new(instance: &mut ScriptInstance) -> VmResult<bool> {
    instance.push(Value::new_list())?;
    Ok(true)
}

pub(super) fn push_list_init(instance: &mut ScriptInstance) -> VmResult<bool> {
    let count = instance.pop()?.as_integer().max(0) as usize;
    let mut values = vec![Value::Null; count];
    // Values pop in reverse push order.
    for slot in values.iter_mut().rev() {
        *slot = instance.pop()?;
    }
    instance.push(Value::List(ListValue::with_values(values)))?;
    Ok(true)
}

fn list_index(list: &Value, index: &Value) -> Value {
    match list {
        Value::List(list) => list.get(index.as_integer()),
        _ => Value::Null,
    }
}

pub(super) fn push_list_index(instance: &mut ScriptInstance) -> VmResult<bool> {
    let index = instance.pop()?;
    let list = instance.pop()?;
    instance.push(list_index(&list, &index))?;
    Ok(true)
}

pub(super) fn push_list_index_contents(instance: &mut ScriptInstance) -> VmResult<bool> {
    let index = instance.peek(0)?.clone();
    let list = instance.peek(1)?.clone();
    instance.push(list_index(&list, &index))?;
    Ok(true)
}

pub(super) fn pop_list(instance: &mut ScriptInstance) -> VmResult<bool> {
    let value = instance.pop()?;
    let index = instance.pop()?;
    let list = instance.pop()?;
    if let Value::List(list) = list {
        list.set(index.as_integer(), value);
    }
    Ok(true)
}

pub(super) fn push_map_new(instance: &mut ScriptInstance) -> VmResult<bool> {
    instance.push(Value::new_map())?;
    Ok(true)
}

pub(super) fn push_map_init(instance: &mut ScriptInstance) -> VmResult<bool> {
    let count = instance.pop()?.as_integer().max(0) as usize;
    let mut pairs = Vec::with_capacity(count);
    for _ in 0..count {
        let value = instance.pop()?;
        let key = instance.pop()?;
        pairs.push((key, value));
    }
    let map = MapValue::new();
    // Pairs popped in reverse; reinsert in push order.
    for (key, value) in pairs.into_iter().rev() {
        map.set(&key.as_string(), value);
    }
    instance.push(Value::Map(map))?;
    Ok(true)
}

fn map_key(map: &Value, key: &Value) -> Value {
    match map {
        Value::Map(map) => map.get(&key.as_string()),
        _ => Value::Null,
    }
}

pub(super) fn push_map_key(instance: &mut ScriptInstance) -> VmResult<bool> {
    let key = instance.pop()?;
    let map = instance.pop()?;
    instance.push(map_key(&map, &key))?;
    Ok(true)
}

pub(super) fn push_map_key_contents(instance: &mut ScriptInstance) -> VmResult<bool> {
    let key = instance.peek(0)?.clone();
    let map = instance.peek(1)?.clone();
    instance.push(map_key(&map, &key))?;
    Ok(true)
}

pub(super) fn pop_map(instance: &mut ScriptInstance) -> VmResult<bool> {
    let value = instance.pop()?;
    let key = instance.pop()?;
    let map = instance.pop()?;
    if let Value::Map(map) = map {
        map.set(&key.as_string(), value);
    }
    Ok(true)
}
