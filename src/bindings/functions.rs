//! Function signature building.
//!
//! A function becomes a symbol only when every parameter and the return type
//! map. Variadic and inline functions have no fixed-ABI symbol to bind and are
//! always skipped.

use std::fmt;

use super::context::{ResolverContext, Symbol};
use super::errors::ContractError;
use super::types::{Definition, FunctionDefinition, PARAMETER_TAG};

/// Why a function produced no symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Inline,
    Variadic,
    Parameter { name: String, tag: String },
    Return { tag: String },
    Duplicate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Inline => write!(f, "inline functions cannot be bound"),
            SkipReason::Variadic => write!(f, "variadic functions cannot be bound"),
            SkipReason::Parameter { name, tag } => {
                write!(f, "parameter `{}` has unmapped type `{}`", name, tag)
            }
            SkipReason::Return { tag } => write!(f, "unmapped return type `{}`", tag),
            SkipReason::Duplicate => write!(f, "already bound by an earlier declaration"),
        }
    }
}

/// Result of processing one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated,
    Skipped(SkipReason),
}

/// Builds symbols from function definitions.
#[derive(Debug, Default)]
pub struct SignatureBuilder;

impl SignatureBuilder {
    pub fn new() -> Self {
        SignatureBuilder
    }

    /// Process every function definition, in input order.
    ///
    /// Stops at the first contract violation.
    pub fn build_all(
        &self,
        definitions: &[Definition],
        ctx: &mut ResolverContext,
    ) -> Result<(), ContractError> {
        for def in definitions {
            if let Definition::Function(function) = def {
                self.build(function, ctx)?;
            }
        }
        Ok(())
    }

    /// Process one function, registering its symbol on success.
    pub fn build(
        &self,
        function: &FunctionDefinition,
        ctx: &mut ResolverContext,
    ) -> Result<Outcome, ContractError> {
        ctx.stats_mut().functions.total += 1;

        let outcome = match self.signature(function, ctx)? {
            Ok(symbol) => {
                if ctx.register_symbol(&function.name, symbol) {
                    ctx.stats_mut().functions.generated += 1;
                    Outcome::Generated
                } else {
                    Outcome::Skipped(SkipReason::Duplicate)
                }
            }
            Err(reason) => Outcome::Skipped(reason),
        };

        match &outcome {
            Outcome::Generated => tracing::debug!("function `{}` bound", function.name),
            Outcome::Skipped(reason) => tracing::warn!(
                "skipping function `{}` @ {}: {}",
                function.name,
                function.location,
                reason
            ),
        }

        Ok(outcome)
    }

    /// Map a function's signature.
    ///
    /// The outer `Result` carries fatal contract violations; the inner one the
    /// reason a well-formed function could not be mapped.
    fn signature(
        &self,
        function: &FunctionDefinition,
        ctx: &ResolverContext,
    ) -> Result<Result<Symbol, SkipReason>, ContractError> {
        if function.inline {
            return Ok(Err(SkipReason::Inline));
        }
        if function.variadic {
            return Ok(Err(SkipReason::Variadic));
        }

        let mapper = ctx.mapper();
        let mut parameters = Vec::with_capacity(function.parameters.len());

        for param in &function.parameters {
            if param.tag != PARAMETER_TAG {
                return Err(ContractError::ParameterTag {
                    function: function.name.clone(),
                    location: function.location.clone(),
                    parameter: param.name.clone(),
                    tag: param.tag.clone(),
                });
            }

            match mapper.map(&param.ty, Some(&param.name)) {
                Some(native) if native.is_void() => {
                    return Err(ContractError::VoidParameter {
                        function: function.name.clone(),
                        location: function.location.clone(),
                        parameter: param.name.clone(),
                    });
                }
                Some(native) => parameters.push(native),
                None => {
                    return Ok(Err(SkipReason::Parameter {
                        name: param.name.clone(),
                        tag: param.ty.tag.clone(),
                    }));
                }
            }
        }

        let Some(result) = mapper.map(&function.return_type, Some(&function.name)) else {
            return Ok(Err(SkipReason::Return {
                tag: function.return_type.tag.clone(),
            }));
        };

        Ok(Ok(Symbol {
            parameters,
            result,
            doc: function.doc(),
        }))
    }
}
