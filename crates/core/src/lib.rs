#![deny(missing_docs)]
//! ftcblocks core: block kind descriptors, the kind registry, and code emission.

/// Emission types: targets, precedence, imports, emitters.
pub mod emit;
/// Core error types.
pub mod error;
/// Read-only views of host-owned block instances.
pub mod instance;
/// Block shape descriptors.
pub mod kind;
/// The block registry.
pub mod registry;
/// Kind sources fetched at runtime.
pub mod source;
/// Data-defined emitters.
pub mod template;

pub use emit::{
    EmitFn, Emission, Emitter, Emitters, Fragment, Generated, Identifiers, Imports, Precedence,
    Target, call, construct, parenthesize,
};
pub use error::{FetchError, RegistryError, SourceError};
pub use instance::{BlockView, ResolvedInputs, Shape, SocketResolver};
pub use kind::{
    BlockKind, Choice, Connection, Field, FieldValues, Lookup, LookupEntry, Socket, SocketType,
};
pub use registry::{BlockRegistry, KindSpec};
pub use source::{
    FetchResult, FileSource, KindSource, StaticSource, install_generated_kinds,
    load_generated_kinds,
};
pub use template::{Arg, Receiver, Template, TemplateEmitter};
