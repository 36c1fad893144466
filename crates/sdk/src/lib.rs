#![deny(missing_docs)]
//! FTC SDK blocks for ftcblocks: the built-in block library, generator
//! configuration, the standard registry, and program generation.

/// Built-in block kinds.
pub mod blocks;
/// Whole-program generation.
pub mod codegen;
/// Generator configuration.
pub mod config;
/// The standard registry.
pub mod defaults;

pub use codegen::{BlockNode, GeneratedProgram, Generator, Input, Program};
pub use config::GeneratorConfig;
pub use defaults::{standard, standard_registry};
