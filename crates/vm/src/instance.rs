//! The script instance: one single-threaded execution of a program.
//!
//! An instance owns its instance stack, closeable set and state machine,
//! holds a shared reference to its immutable program, and consults its
//! resolvers read-only. `update()` runs instructions until the script
//! returns, a host function takes control, the command budget trips, or the
//! instance leaves the RUNNING state.

use std::rc::Rc;
use std::sync::Arc;

use crate::closeable::{Closeable, CloseableSet};
use crate::environment::{ScriptEnvironment, StandardEnvironment};
use crate::error::{VmError, VmResult};
use crate::host::{HostFunction, HostFunctionResolver};
use crate::instance_stack::InstanceStack;
use crate::ops;
use crate::program::Program;
use crate::scope::ScopeResolver;
use crate::state::ScriptState;
use crate::value::{FromValue, Value};
use crate::wait::WaitHandler;

/// A single-threaded executor for one program.
pub struct ScriptInstance {
    program: Arc<Program>,
    stack: InstanceStack,
    host_resolver: Arc<dyn HostFunctionResolver>,
    scope_resolver: Option<Rc<dyn ScopeResolver>>,
    wait_handler: Option<Rc<dyn WaitHandler>>,
    environment: Rc<dyn ScriptEnvironment>,
    state: ScriptState,
    runaway_limit: u64,
    commands_executed: u64,
    wait_type: Value,
    wait_parameter: Value,
    closeables: CloseableSet,
}

impl ScriptInstance {
    /// Creates an instance over `program` with the given stack, host
    /// function resolver, and per-update command budget (zero disables the
    /// budget).
    pub fn new(
        program: Arc<Program>,
        stack: InstanceStack,
        host_resolver: Arc<dyn HostFunctionResolver>,
        runaway_limit: u64,
    ) -> Self {
        Self {
            program,
            stack,
            host_resolver,
            scope_resolver: None,
            wait_handler: None,
            environment: Rc::new(StandardEnvironment::new()),
            state: ScriptState::Created,
            runaway_limit,
            commands_executed: 0,
            wait_type: Value::Null,
            wait_parameter: Value::Null,
            closeables: CloseableSet::default(),
        }
    }

    /// Attaches a resolver for named outer scopes.
    pub fn with_scope_resolver(mut self, resolver: Rc<dyn ScopeResolver>) -> Self {
        self.scope_resolver = Some(resolver);
        self
    }

    /// Attaches a wait handler.
    pub fn with_wait_handler(mut self, handler: Rc<dyn WaitHandler>) -> Self {
        self.wait_handler = Some(handler);
        self
    }

    /// Replaces the standard environment.
    pub fn with_environment(mut self, environment: Rc<dyn ScriptEnvironment>) -> Self {
        self.environment = environment;
        self
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> ScriptState {
        self.state
    }

    /// Returns the program this instance executes.
    pub fn program(&self) -> &Arc<Program> {
        &self.program
    }

    /// Returns the environment host functions print through.
    pub fn environment(&self) -> Rc<dyn ScriptEnvironment> {
        Rc::clone(&self.environment)
    }

    /// Returns the wait type recorded by the last `wait` call.
    pub fn wait_type(&self) -> &Value {
        &self.wait_type
    }

    /// Returns the wait parameter recorded by the last `wait` call.
    pub fn wait_parameter(&self) -> &Value {
        &self.wait_parameter
    }

    pub(crate) fn stack(&self) -> &InstanceStack {
        &self.stack
    }

    pub(crate) fn stack_mut(&mut self) -> &mut InstanceStack {
        &mut self.stack
    }

    pub(crate) fn scope_resolver(&self) -> Option<Rc<dyn ScopeResolver>> {
        self.scope_resolver.clone()
    }

    pub(crate) fn resolve_host_function(
        &self,
        name: &str,
        namespace: Option<&str>,
    ) -> VmResult<Arc<dyn HostFunction>> {
        let resolved = match namespace {
            Some(namespace) => self
                .host_resolver
                .get_namespaced_function(namespace, name),
            None => self.host_resolver.get_function(name),
        };
        resolved.ok_or_else(|| match namespace {
            Some(namespace) => VmError::unresolved_function(format!("{namespace}::{name}")),
            None => VmError::unresolved_function(name),
        })
    }

    pub(crate) fn resolve_label(&self, label: &str) -> VmResult<usize> {
        self.program
            .resolve_label(label)
            .ok_or_else(|| VmError::unresolved_label(label))
    }

    /// Initializes the instance at a named entry point, pushing `args` onto
    /// the operand stack in order and padding missing parameters with NULL.
    /// Supplying more arguments than the entry declares is an error.
    pub fn initialize(&mut self, entry_name: &str, args: &[Value]) -> VmResult<()> {
        let entry = self
            .program
            .entry(entry_name)
            .cloned()
            .ok_or_else(|| VmError::unresolved_entry(entry_name))?;
        if args.len() > entry.parameter_count() {
            return Err(VmError::BadParameterCount {
                name: entry.name().to_string(),
                expected: entry.parameter_count(),
                actual: args.len(),
            });
        }

        self.begin_at(entry.index())?;
        for arg in args {
            self.stack.push(arg.clone())?;
        }
        for _ in args.len()..entry.parameter_count() {
            self.stack.push(Value::Null)?;
        }
        log::debug!(
            "initialized at entry {} (index {}, {} args)",
            entry.name(),
            entry.index(),
            args.len()
        );
        Ok(())
    }

    /// Initializes the instance at a label, with no arguments.
    pub fn initialize_label(&mut self, label: &str) -> VmResult<()> {
        let index = self.resolve_label(label)?;
        self.begin_at(index)
    }

    /// Initializes the instance at a raw instruction index.
    pub fn initialize_index(&mut self, index: usize) -> VmResult<()> {
        self.begin_at(index)
    }

    fn begin_at(&mut self, index: usize) -> VmResult<()> {
        self.stack.reset();
        self.wait_type = Value::Null;
        self.wait_parameter = Value::Null;
        self.state = ScriptState::Init;
        self.stack.push_frame(index)?;
        self.stack.set_command_index(index);
        Ok(())
    }

    /// Runs the instance until it yields: the script returns, a host
    /// function takes control, the state leaves RUNNING, or the command
    /// budget trips.
    ///
    /// While WAITING, consults the wait handler instead: when
    /// `can_continue` reports true the instance is resumed (the next
    /// `update()` executes); otherwise the handler's `update` runs once.
    ///
    /// An execution error leaves the state machine untouched; the embedder
    /// decides whether to `terminate()`.
    pub fn update(&mut self) -> VmResult<()> {
        match self.state {
            ScriptState::Created => Err(VmError::NotInitialized),
            ScriptState::Ended | ScriptState::Suspended => Ok(()),
            ScriptState::Waiting => {
                if let Some(handler) = self.wait_handler.clone() {
                    let wait_type = self.wait_type.clone();
                    let wait_parameter = self.wait_parameter.clone();
                    if handler.can_continue(&wait_type, &wait_parameter) {
                        self.resume();
                    } else {
                        handler.update(self, &wait_type, &wait_parameter);
                    }
                }
                Ok(())
            }
            ScriptState::Init | ScriptState::Running => {
                self.state = ScriptState::Running;
                self.commands_executed = 0;
                loop {
                    if !self.step()? {
                        break;
                    }
                    self.commands_executed += 1;
                    if self.runaway_limit > 0 && self.commands_executed > self.runaway_limit {
                        return Err(VmError::RunawayExecution {
                            limit: self.runaway_limit,
                        });
                    }
                    if self.state != ScriptState::Running {
                        break;
                    }
                }
                Ok(())
            }
        }
    }

    /// Executes a single instruction. Returns `false` when execution must
    /// stop (final return, host stop signal, or end of instructions).
    pub fn step(&mut self) -> VmResult<bool> {
        let index = self.stack.command_index();
        self.stack.increment_command_index();
        let program = Arc::clone(&self.program);
        match program.instruction_at(index) {
            Some(instruction) => ops::execute(self, instruction),
            None => {
                self.terminate();
                Ok(false)
            }
        }
    }

    /// Convenience: initialize at `entry_name` and run to completion.
    pub fn call(&mut self, entry_name: &str, args: &[Value]) -> VmResult<()> {
        self.initialize(entry_name, args)?;
        self.update()
    }

    /// Convenience: [`call`](Self::call), then pop the script's return value
    /// and coerce it.
    pub fn call_and_return<T: FromValue>(
        &mut self,
        entry_name: &str,
        args: &[Value],
    ) -> VmResult<T> {
        self.call(entry_name, args)?;
        let value = self.stack.pop().unwrap_or(Value::Null);
        Ok(T::from_value(&value))
    }

    /// Puts the instance into WAITING with an opaque wait type and
    /// parameter for the wait handler. Ignored once the instance has ended
    /// or before it was initialized.
    pub fn wait(&mut self, wait_type: Value, wait_parameter: Value) {
        if matches!(self.state, ScriptState::Created | ScriptState::Ended) {
            return;
        }
        log::debug!("waiting on {wait_type}");
        self.wait_type = wait_type;
        self.wait_parameter = wait_parameter;
        self.state = ScriptState::Waiting;
    }

    /// Returns a WAITING or SUSPENDED instance to RUNNING and clears the
    /// wait state.
    pub fn resume(&mut self) {
        if !matches!(self.state, ScriptState::Waiting | ScriptState::Suspended) {
            return;
        }
        log::debug!("resumed");
        self.wait_type = Value::Null;
        self.wait_parameter = Value::Null;
        self.state = ScriptState::Running;
    }

    /// Pauses the instance until `resume()`. Ignored once ended.
    pub fn suspend(&mut self) {
        if matches!(self.state, ScriptState::Created | ScriptState::Ended) {
            return;
        }
        log::debug!("suspended");
        self.state = ScriptState::Suspended;
    }

    /// Ends the instance: clears wait state and closes every registered
    /// closeable. After this, `update()` is a no-op.
    pub fn terminate(&mut self) {
        if self.state == ScriptState::Ended {
            return;
        }
        log::debug!("terminated");
        self.wait_type = Value::Null;
        self.wait_parameter = Value::Null;
        self.state = ScriptState::Ended;
        self.closeables.close_all();
    }

    /// Returns the instance to its just-constructed state. Registered
    /// closeables are kept; they close when the instance ends.
    pub fn reset(&mut self) {
        self.stack.reset();
        self.wait_type = Value::Null;
        self.wait_parameter = Value::Null;
        self.state = ScriptState::Created;
    }

    /// Pushes an operand value.
    pub fn push(&mut self, value: Value) -> VmResult<()> {
        self.stack.push(value)
    }

    /// Pops the top operand value.
    pub fn pop(&mut self) -> VmResult<Value> {
        self.stack.pop()
    }

    /// Returns the operand value `depth` slots below the top.
    pub fn peek(&self, depth: usize) -> VmResult<&Value> {
        self.stack.peek(depth)
    }

    /// Looks up a variable in the current frame's local scope.
    pub fn get_value(&self, name: &str) -> VmResult<Option<Value>> {
        self.stack.get_value(name)
    }

    /// Assigns a variable in the current frame's local scope.
    pub fn set_value(&mut self, name: &str, value: Value) -> VmResult<()> {
        self.stack.set_value(name, value)
    }

    /// Pushes an activation frame returning to `return_index`.
    pub fn push_frame(&mut self, return_index: usize) -> VmResult<()> {
        self.stack.push_frame(return_index)
    }

    /// Pops the top activation frame.
    pub fn pop_frame(&mut self) -> VmResult<()> {
        self.stack.pop_frame()
    }

    /// Registers a closeable to be closed when the instance ends.
    pub fn register_closeable(&mut self, closeable: Rc<dyn Closeable>) {
        self.closeables.register(closeable);
    }

    /// Unregisters a closeable without closing it.
    pub fn unregister_closeable(&mut self, closeable: &Rc<dyn Closeable>) -> bool {
        self.closeables.unregister(closeable)
    }

    /// Returns `true` when `closeable` is registered with this instance.
    pub fn closeable_is_registered(&self, closeable: &Rc<dyn Closeable>) -> bool {
        self.closeables.is_registered(closeable)
    }
}

impl std::fmt::Debug for ScriptInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptInstance")
            .field("state", &self.state)
            .field("command_index", &self.stack.command_index())
            .field("frame_depth", &self.stack.frame_depth())
            .field("value_count", &self.stack.value_count())
            .field("runaway_limit", &self.runaway_limit)
            .finish()
    }
}
