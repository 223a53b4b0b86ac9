//! Bundled host functions.
//!
//! A small library demonstrating the host-function contract: type and error
//! inspection in [`common`], the print family in [`stdio`]. Embedders opt in
//! by adding the resolvers to their composite; nothing here is callable
//! unless registered.

pub mod common;
pub mod stdio;

pub use common::CommonFunctions;
pub use stdio::StdioFunctions;
