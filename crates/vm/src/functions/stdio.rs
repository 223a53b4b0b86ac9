//! Print-family host functions over the script environment.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::host::{
    HostFunction, HostFunctionError, HostFunctionTable, SimpleHostFunction, Usage,
};
use crate::instance::ScriptInstance;
use crate::value::Value;

fn fn_print(
    instance: &mut ScriptInstance,
    _return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    instance.environment().print(&value.as_string());
    Ok(true)
}

fn fn_println(
    instance: &mut ScriptInstance,
    _return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    let environment = instance.environment();
    environment.print(&value.as_string());
    environment.print("\n");
    Ok(true)
}

fn fn_printerr(
    instance: &mut ScriptInstance,
    _return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    instance.environment().print_err(&value.as_string());
    Ok(true)
}

fn fn_printerrln(
    instance: &mut ScriptInstance,
    _return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    let value = instance.pop()?;
    let environment = instance.environment();
    environment.print_err(&value.as_string());
    environment.print_err("\n");
    Ok(true)
}

fn fn_readline(
    instance: &mut ScriptInstance,
    return_value: &mut Value,
) -> Result<bool, HostFunctionError> {
    if let Some(line) = instance.environment().read_line()? {
        *return_value = Value::from(line);
    }
    Ok(true)
}

static FUNCTIONS: Lazy<Vec<Arc<dyn HostFunction>>> = Lazy::new(|| {
    vec![
        Arc::new(
            SimpleHostFunction::new("print", 1, fn_print).with_usage(
                Usage::new("Prints a value to standard output.")
                    .parameter("value", "The value to print."),
            ),
        ),
        Arc::new(SimpleHostFunction::new("println", 1, fn_println)),
        Arc::new(SimpleHostFunction::new("printerr", 1, fn_printerr)),
        Arc::new(SimpleHostFunction::new("printerrln", 1, fn_printerrln)),
        Arc::new(
            SimpleHostFunction::new("readline", 0, fn_readline).with_usage(
                Usage::new("Reads one line from standard input.")
                    .returns("The line without its newline, or null at end of input."),
            ),
        ),
    ]
});

/// The standard-I/O function set.
pub struct StdioFunctions;

impl StdioFunctions {
    /// Builds a resolver over the print family and `readline`.
    pub fn resolver() -> HostFunctionTable {
        let mut table = HostFunctionTable::new();
        for function in FUNCTIONS.iter() {
            table.insert(Arc::clone(function));
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostFunctionResolver;

    #[test]
    fn test_all_functions_registered() {
        let resolver = StdioFunctions::resolver();
        for name in ["print", "println", "printerr", "printerrln", "readline"] {
            assert!(resolver.contains_function(name), "{name} missing");
        }
        assert_eq!(resolver.get_function("print").unwrap().parameter_count(), 1);
        assert_eq!(
            resolver.get_function("readline").unwrap().parameter_count(),
            0
        );
    }
}
