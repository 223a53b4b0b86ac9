//! # RookScript VM
//!
//! The execution core of RookScript, an embeddable, host-agnostic scripting
//! language for real-time loops and on-demand batch work.
//!
//! This crate executes pre-built programs; producing them (lexing, parsing,
//! compiling) is a separate concern. Nothing is callable from a script
//! unless the embedder registered it: the only capability surface is the
//! host-function resolver.
//!
//! ## Architecture
//!
//! - **Program**: the immutable compiled artifact — instructions plus label
//!   and entry tables, freely shared between instances.
//! - **Value**: the dynamic value model — null, booleans, 64-bit integers
//!   and floats, strings, shared mutable lists/maps/buffers, script-visible
//!   errors, and opaque host handles.
//! - **InstanceStack**: the bounded two-axis stack — activation frames with
//!   per-frame local scopes, and the operand stack.
//! - **ScriptInstance**: the interpreter — state machine, update/step loop,
//!   host dispatch, wait protocol, closeable cleanup, and command budget.
//! - **Resolvers**: read-only lookups the core consults — host functions
//!   (possibly namespaced) and named outer variable scopes.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rookscript_vm::{
//!     HostFunctionTable, InstanceStack, Instruction, Literal, ProgramBuilder,
//!     ScriptInstance,
//! };
//!
//! # fn example() -> Result<(), rookscript_vm::VmError> {
//! // push 3, push 4, add, return
//! let mut builder = ProgramBuilder::new();
//! builder
//!     .entry("main", 0)
//!     .emit(Instruction::Push { value: Literal::from(3i64) })
//!     .emit(Instruction::Push { value: Literal::from(4i64) })
//!     .emit(Instruction::Add)
//!     .emit(Instruction::Return);
//! let program = Arc::new(builder.build());
//!
//! let stack = InstanceStack::new(256, 2048)?;
//! let functions = Arc::new(HostFunctionTable::new());
//! let mut instance = ScriptInstance::new(program, stack, functions, 0);
//!
//! let result: i64 = instance.call_and_return("main", &[])?;
//! assert_eq!(result, 7);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Threading
//!
//! One instance is strictly single-threaded. Values use non-atomic shared
//! references, so they cannot cross threads at all; separate instances may
//! run on separate threads, sharing only the program and the host-function
//! resolver.

#![warn(rustdoc::missing_crate_level_docs)]

/// Closeable host resources with instance-bounded lifetimes.
pub mod closeable;
/// Standard I/O surface for print-family host functions.
pub mod environment;
/// VM error types and result handling.
pub mod error;
/// Bundled host-function library.
pub mod functions;
/// Host-function contract and resolvers.
pub mod host;
/// The script instance and its embedding API.
pub mod instance;
/// The bounded activation-frame and operand stacks.
pub mod instance_stack;
/// Instruction representation.
pub mod instruction;
/// Instruction execution.
mod ops;
/// The immutable compiled program.
pub mod program;
/// Programmatic program construction.
pub mod program_builder;
/// Named outer variable scopes and their resolver.
pub mod scope;
/// Instance lifecycle states.
pub mod state;
/// The runtime value model.
pub mod value;
/// Wait-handler delegate for ticked execution.
pub mod wait;

pub use closeable::Closeable;
pub use environment::{CaptureEnvironment, ScriptEnvironment, StandardEnvironment};
pub use error::{VmError, VmResult};
pub use functions::{CommonFunctions, StdioFunctions};
pub use host::{
    CompositeHostFunctionResolver, HostFunction, HostFunctionError, HostFunctionResolver,
    HostFunctionTable, SimpleHostFunction, Usage,
};
pub use instance::ScriptInstance;
pub use instance_stack::{InstanceStack, LocalScope};
pub use instruction::{Instruction, Literal};
pub use program::{Entry, Program};
pub use program_builder::ProgramBuilder;
pub use scope::{MapScope, MapScopeResolver, ScopeResolver, VariableScope};
pub use state::ScriptState;
pub use value::{
    BufferValue, ByteOrder, ErrorValue, FromValue, ListValue, MapValue, ObjectRef, Value,
    ValueType,
};
pub use wait::WaitHandler;
