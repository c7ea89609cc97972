//! ffigen - FFI binding generator for C libraries
//!
//! This crate turns the declaration records emitted by the c2ffi header
//! introspector into a Deno FFI module, mapping C types onto the runtime's
//! native type vocabulary and skipping whatever cannot be mapped.

pub mod bindings;
pub mod ops;
pub mod util;

pub use bindings::{Definition, DefinitionDecoder, NativeType, ResolverContext, SymbolTable};
pub use ops::{generate_bindings, GenerateOptions};
