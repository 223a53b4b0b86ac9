//! Host function dispatch: the only capability surface scripts can reach.
//!
//! Nothing is callable from a script unless the embedder registered it.
//! Lookups are case-insensitive for both namespaces and names. A composite
//! resolver routes namespaced names to the resolver bound to that namespace
//! and tries global resolvers in registration order, first match wins.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::instance::ScriptInstance;
use crate::value::Value;

/// The error type host functions fail with; the VM wraps it into an
/// execution error and halts the instance.
pub type HostFunctionError = Box<dyn std::error::Error>;

/// Structured documentation for a host function, consumed by diagnostic
/// tooling, never by the VM.
#[derive(Debug, Clone, Default)]
pub struct Usage {
    description: String,
    parameters: Vec<ParameterUsage>,
    returns: String,
}

/// Documentation for one host-function parameter.
#[derive(Debug, Clone)]
pub struct ParameterUsage {
    name: String,
    description: String,
}

impl ParameterUsage {
    /// Returns the parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Usage {
    /// Creates usage documentation with the given description.
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self {
            description: description.into(),
            parameters: Vec::new(),
            returns: String::new(),
        }
    }

    /// Appends a parameter description, in call order.
    pub fn parameter<N: Into<String>, D: Into<String>>(mut self, name: N, description: D) -> Self {
        self.parameters.push(ParameterUsage {
            name: name.into(),
            description: description.into(),
        });
        self
    }

    /// Sets the return-value description.
    pub fn returns<S: Into<String>>(mut self, description: S) -> Self {
        self.returns = description.into();
        self
    }

    /// Returns the function description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parameter descriptions in call order.
    pub fn parameters(&self) -> &[ParameterUsage] {
        &self.parameters
    }

    /// Returns the return-value description.
    pub fn return_description(&self) -> &str {
        &self.returns
    }
}

/// A function implemented by the embedder and callable from scripts.
///
/// The execution contract: the function pops exactly
/// [`parameter_count`](HostFunction::parameter_count) operands (top of stack
/// is the last parameter), writes its result into `return_value` (leaving it
/// NULL returns NULL), and returns `true` to continue execution or `false`
/// to stop the instance without ending it — the embedder has taken control,
/// typically because the function put the instance into WAITING or
/// SUSPENDED. A returned error is wrapped into an execution error and halts
/// the instance.
pub trait HostFunction: Send + Sync {
    /// Returns the canonical identifier, a valid script identifier.
    fn name(&self) -> &str;

    /// Returns the fixed parameter count.
    fn parameter_count(&self) -> usize;

    /// Returns structured documentation, if any.
    fn usage(&self) -> Option<&Usage> {
        None
    }

    /// Executes the function body against the calling instance.
    fn execute(
        &self,
        instance: &mut ScriptInstance,
        return_value: &mut Value,
    ) -> Result<bool, HostFunctionError>;
}

/// The handler signature for [`SimpleHostFunction`].
pub type HostFunctionHandler =
    fn(&mut ScriptInstance, &mut Value) -> Result<bool, HostFunctionError>;

/// A host function backed by a plain function pointer.
pub struct SimpleHostFunction {
    name: String,
    parameter_count: usize,
    usage: Option<Usage>,
    handler: HostFunctionHandler,
}

impl SimpleHostFunction {
    /// Creates a host function from a name, arity, and handler.
    pub fn new<S: Into<String>>(
        name: S,
        parameter_count: usize,
        handler: HostFunctionHandler,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_count,
            usage: None,
            handler,
        }
    }

    /// Attaches usage documentation.
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }
}

impl HostFunction for SimpleHostFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    fn usage(&self) -> Option<&Usage> {
        self.usage.as_ref()
    }

    fn execute(
        &self,
        instance: &mut ScriptInstance,
        return_value: &mut Value,
    ) -> Result<bool, HostFunctionError> {
        (self.handler)(instance, return_value)
    }
}

/// Resolves possibly-namespaced names to host functions.
///
/// `contains_function` and `get_function` must agree: one returns `true`
/// exactly when the other returns a descriptor, and repeated lookups of the
/// same name return the same descriptor.
pub trait HostFunctionResolver: Send + Sync {
    /// Returns `true` when an unqualified name resolves.
    fn contains_function(&self, name: &str) -> bool;

    /// Resolves an unqualified name.
    fn get_function(&self, name: &str) -> Option<Arc<dyn HostFunction>>;

    /// Returns `true` when a namespaced name resolves.
    fn contains_namespaced_function(&self, namespace: &str, name: &str) -> bool {
        let _ = (namespace, name);
        false
    }

    /// Resolves a namespaced name.
    fn get_namespaced_function(&self, namespace: &str, name: &str) -> Option<Arc<dyn HostFunction>> {
        let _ = (namespace, name);
        None
    }
}

/// A flat name-to-function table, the leaf resolver most embedders build.
#[derive(Default)]
pub struct HostFunctionTable {
    functions: HashMap<String, Arc<dyn HostFunction>>,
}

impl HostFunctionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `function` under its canonical name, replacing any
    /// previous registration of that name.
    pub fn insert(&mut self, function: Arc<dyn HostFunction>) -> &mut Self {
        self.functions
            .insert(function.name().to_lowercase(), function);
        self
    }

    /// Returns the number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` when no functions are registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl HostFunctionResolver for HostFunctionTable {
    fn contains_function(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }

    fn get_function(&self, name: &str) -> Option<Arc<dyn HostFunction>> {
        self.functions.get(&name.to_lowercase()).cloned()
    }
}

/// Composes resolvers, each bound to a namespace or registered globally.
///
/// For a namespaced name only the resolver bound to that namespace is
/// consulted. For an unqualified name the global resolvers are tried in
/// insertion order and the first match wins; the embedder controls
/// precedence by ordering.
#[derive(Default)]
pub struct CompositeHostFunctionResolver {
    global: Vec<Arc<dyn HostFunctionResolver>>,
    namespaced: HashMap<String, Arc<dyn HostFunctionResolver>>,
}

impl CompositeHostFunctionResolver {
    /// Creates an empty composite resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a resolver to the global namespace.
    pub fn add_global(&mut self, resolver: Arc<dyn HostFunctionResolver>) -> &mut Self {
        self.global.push(resolver);
        self
    }

    /// Binds a resolver to `namespace`, replacing any previous binding.
    pub fn add_namespace<S: Into<String>>(
        &mut self,
        namespace: S,
        resolver: Arc<dyn HostFunctionResolver>,
    ) -> &mut Self {
        self.namespaced
            .insert(namespace.into().to_lowercase(), resolver);
        self
    }
}

impl HostFunctionResolver for CompositeHostFunctionResolver {
    fn contains_function(&self, name: &str) -> bool {
        self.global
            .iter()
            .any(|resolver| resolver.contains_function(name))
    }

    fn get_function(&self, name: &str) -> Option<Arc<dyn HostFunction>> {
        self.global
            .iter()
            .find_map(|resolver| resolver.get_function(name))
    }

    fn contains_namespaced_function(&self, namespace: &str, name: &str) -> bool {
        self.namespaced
            .get(&namespace.to_lowercase())
            .map(|resolver| resolver.contains_function(name))
            .unwrap_or(false)
    }

    fn get_namespaced_function(&self, namespace: &str, name: &str) -> Option<Arc<dyn HostFunction>> {
        self.namespaced
            .get(&namespace.to_lowercase())
            .and_then(|resolver| resolver.get_function(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn null_handler(
        _instance: &mut ScriptInstance,
        _return_value: &mut Value,
    ) -> Result<bool, HostFunctionError> {
        Ok(true)
    }

    fn table_with(names: &[&str]) -> Arc<dyn HostFunctionResolver> {
        let mut table = HostFunctionTable::new();
        for name in names {
            table.insert(Arc::new(SimpleHostFunction::new(*name, 0, null_handler)));
        }
        Arc::new(table)
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut table = HostFunctionTable::new();
        table.insert(Arc::new(SimpleHostFunction::new("Print", 1, null_handler)));

        assert!(table.contains_function("print"));
        assert!(table.contains_function("PRINT"));
        assert_eq!(table.get_function("pRiNt").unwrap().parameter_count(), 1);
    }

    #[test]
    fn test_contains_agrees_with_get() {
        let table = table_with(&["alpha", "beta"]);
        for name in ["alpha", "beta", "gamma", "ALPHA"] {
            assert_eq!(
                table.contains_function(name),
                table.get_function(name).is_some()
            );
        }
    }

    #[test]
    fn test_repeated_lookup_returns_same_descriptor() {
        let table = table_with(&["alpha"]);
        let first = table.get_function("alpha").unwrap();
        let second = table.get_function("ALPHA").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_global_resolvers_shadow_in_insertion_order() {
        let mut first = HostFunctionTable::new();
        first.insert(Arc::new(SimpleHostFunction::new("dup", 1, null_handler)));
        let mut second = HostFunctionTable::new();
        second.insert(Arc::new(SimpleHostFunction::new("dup", 2, null_handler)));

        let mut composite = CompositeHostFunctionResolver::new();
        composite
            .add_global(Arc::new(first))
            .add_global(Arc::new(second));

        // First registration wins.
        assert_eq!(composite.get_function("dup").unwrap().parameter_count(), 1);
    }

    #[test]
    fn test_namespaced_lookup_only_consults_bound_resolver() {
        let mut composite = CompositeHostFunctionResolver::new();
        composite.add_global(table_with(&["global_only"]));
        composite.add_namespace("IO", table_with(&["open"]));

        assert!(composite.contains_namespaced_function("io", "OPEN"));
        assert!(!composite.contains_namespaced_function("io", "global_only"));
        assert!(!composite.contains_namespaced_function("net", "open"));
        assert!(composite.get_namespaced_function("Io", "open").is_some());
        // Namespaced functions are invisible to unqualified lookup.
        assert!(!composite.contains_function("open"));
    }
}
