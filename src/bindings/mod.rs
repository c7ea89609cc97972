//! FFI binding generation from c2ffi declaration records.
//!
//! Decoding, type mapping, typedef and signature resolution, and rendering
//! of the final binding module.

pub mod context;
pub mod decoder;
pub mod errors;
pub mod functions;
pub mod generator;
pub mod mapper;
pub mod native;
pub mod report;
pub mod typedefs;
pub mod types;

pub use context::{ResolverContext, RunStats, Symbol, SymbolTable, Tally};
pub use decoder::{DefinitionDecoder, DefinitionStream};
pub use errors::{ContractError, DecodeError};
pub use functions::{Outcome, SignatureBuilder, SkipReason};
pub use generator::{DenoGenerator, EmitFormat};
pub use mapper::TypeMapper;
pub use native::NativeType;
pub use report::RunReport;
pub use typedefs::TypedefResolver;
pub use types::{
    Definition, Field, FunctionDefinition, Parameter, StructDefinition, Type, TypedefDefinition,
};
