//! Fatal errors raised while decoding or mapping a declaration stream.
//!
//! Unmappable types are not errors; they skip the owning definition. Only a
//! broken input contract ends the run.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// The declaration stream could not be decoded.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum DecodeError {
    #[error("declaration stream is not valid JSON")]
    #[diagnostic(code(ffigen::decode::json))]
    Json(#[source] serde_json::Error),

    #[error("declaration stream must be a JSON array, found {found}")]
    #[diagnostic(code(ffigen::decode::not_an_array))]
    NotAnArray { found: &'static str },

    #[error("malformed `{tag}` record at index {index}")]
    #[diagnostic(code(ffigen::decode::record))]
    Record {
        index: usize,
        tag: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The input broke a guarantee of the introspector's output format.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ContractError {
    #[error("parameter `{parameter}` of `{function}` has tag `{tag}`, expected `parameter`")]
    #[diagnostic(
        code(ffigen::contract::parameter_tag),
        help("the declaration stream is corrupt or was not produced by c2ffi")
    )]
    ParameterTag {
        function: String,
        location: String,
        parameter: String,
        tag: String,
    },

    #[error("parameter `{parameter}` of `{function}` has type void")]
    #[diagnostic(
        code(ffigen::contract::void_parameter),
        help("void is only valid as a return type")
    )]
    VoidParameter {
        function: String,
        location: String,
        parameter: String,
    },
}

impl ContractError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let location = match self {
            ContractError::ParameterTag { location, .. }
            | ContractError::VoidParameter { location, .. } => location,
        };

        let mut diag = Diagnostic::error(self.to_string());
        if !location.is_empty() {
            diag = diag.with_location(location.as_str());
        }

        match self {
            ContractError::ParameterTag { tag, .. } => diag
                .with_context(format!("found record tag `{}` in a parameter list", tag))
                .with_suggestion(suggestions::REGENERATE_INPUT),
            ContractError::VoidParameter { .. } => diag
                .with_context("a parameter list of `(void)` is encoded as no parameters")
                .with_suggestion(suggestions::REGENERATE_INPUT),
        }
    }
}

impl DecodeError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            DecodeError::Json(e) | DecodeError::Record { source: e, .. } => diag
                .with_context(e.to_string())
                .with_suggestion(suggestions::REGENERATE_INPUT),
            DecodeError::NotAnArray { .. } => diag.with_suggestion(suggestions::REGENERATE_INPUT),
        }
    }
}
