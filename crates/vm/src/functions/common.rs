//! Type inspection, conversion, and error-value host functions.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::host::{
    HostFunction, HostFunctionError, HostFunctionTable, SimpleHostFunction, Usage,
};
use crate::instance::ScriptInstance;
use crate::value::Value;

fn fn_typeof(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    *return_value = Value::from(value.value_type().to_string().to_lowercase());
    Ok(true)
}

fn fn_length(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    *return_value = Value::from(value.length());
    Ok(true)
}

fn fn_isempty(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    *return_value = Value::from(value.empty());
    Ok(true)
}

fn fn_iserror(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    *return_value = Value::from(value.is_error());
    Ok(true)
}

fn fn_error(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let message = instance.pop()?;
    let error_type = instance.pop()?;
    *return_value = Value::error(error_type.as_string(), message.as_string());
    Ok(true)
}

fn fn_errortype(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    if let Value::Error(error) = &value {
        *return_value = Value::from(error.error_type());
    }
    Ok(true)
}

fn fn_errormsg(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    if let Value::Error(error) = &value {
        *return_value = Value::from(error.message());
    }
    Ok(true)
}

fn fn_errormap(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    if let Value::Error(error) = &value {
        *return_value = Value::Map(error.to_map());
    }
    Ok(true)
}

fn fn_tostring(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    *return_value = Value::from(value.as_string());
    Ok(true)
}

fn fn_toint(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    *return_value = Value::from(value.as_integer());
    Ok(true)
}

fn fn_tofloat(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    *return_value = Value::from(value.as_double());
    Ok(true)
}

fn fn_toboolean(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    *return_value = Value::from(value.as_boolean());
    Ok(true)
}

static FUNCTIONS: Lazy<Vec<Arc<dyn HostFunction>>> = Lazy::new(|| {
    vec![
        Arc::new(
            SimpleHostFunction::new("typeof", 1, fn_typeof).with_usage(
                Usage::new("Returns the type name of a value.")
                    .parameter("value", "The value to inspect.")
                    .returns("The lower-case type name."),
            ),
        ),
        Arc::new(
            SimpleHostFunction::new("length", 1, fn_length).with_usage(
                Usage::new("Returns the length of a string, list, map, or buffer.")
                    .parameter("value", "The value to measure.")
                    .returns("The length, 0 for null, 1 for other values."),
            ),
        ),
        Arc::new(SimpleHostFunction::new("isempty", 1, fn_isempty)),
        Arc::new(
            SimpleHostFunction::new("iserror", 1, fn_iserror).with_usage(
                Usage::new("Tests whether a value is an error.")
                    .parameter("value", "The value to test.")
                    .returns("True when the value is an error."),
            ),
        ),
        Arc::new(
            SimpleHostFunction::new("error", 2, fn_error).with_usage(
                Usage::new("Creates an error value.")
                    .parameter("type", "The error type tag.")
                    .parameter("message", "The error message.")
                    .returns("A new error value."),
            ),
        ),
        Arc::new(SimpleHostFunction::new("errortype", 1, fn_errortype)),
        Arc::new(SimpleHostFunction::new("errormsg", 1, fn_errormsg)),
        Arc::new(
            SimpleHostFunction::new("errormap", 1, fn_errormap).with_usage(
                Usage::new("Converts an error to a map.")
                    .parameter("error", "The error value.")
                    .returns("A map with type, message, and localizedMessage."),
            ),
        ),
        Arc::new(SimpleHostFunction::new("tostring", 1, fn_tostring)),
        Arc::new(SimpleHostFunction::new("toint", 1, fn_toint)),
        Arc::new(SimpleHostFunction::new("tofloat", 1, fn_tofloat)),
        Arc::new(SimpleHostFunction::new("toboolean", 1, fn_toboolean)),
    ]
});

/// The common function set: type inspection, conversion, and error values.
pub struct CommonFunctions;

impl CommonFunctions {
    /// Builds a resolver over the common function set. Descriptors are
    /// shared between calls, so repeated lookups return the same function.
    pub fn resolver() -> HostFunctionTable {
        let mut table = HostFunctionTable::new();
        for function in FUNCTIONS.iter() {
            table.insert(Arc::clone(function));
        }
        table
    }
}
