//! High-level operations.
//!
//! This module contains the implementation of ffigen commands.

pub mod generate;

pub use generate::{generate_bindings, GenerateOptions, GenerateResult};
