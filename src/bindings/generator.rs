//! Binding module generation.
//!
//! Renders a symbol table as a Deno FFI module: a `symbols` literal, a
//! `Deno.dlopen` call against the configured library, and a default export of
//! the bound symbols. Struct types are expanded inline at every use site.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use super::context::SymbolTable;

/// Output format of the generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitFormat {
    /// TypeScript module for `Deno.dlopen`
    #[default]
    Deno,

    /// The symbol table as JSON
    Json,
}

impl std::fmt::Display for EmitFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmitFormat::Deno => write!(f, "deno"),
            EmitFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for EmitFormat {
    type Err = EmitFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deno" | "ts" | "typescript" => Ok(EmitFormat::Deno),
            "json" => Ok(EmitFormat::Json),
            _ => Err(EmitFormatParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid emit format string.
#[derive(Debug, Clone)]
pub struct EmitFormatParseError(pub String);

impl std::fmt::Display for EmitFormatParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid emit format '{}', valid values: deno, json",
            self.0
        )
    }
}

impl std::error::Error for EmitFormatParseError {}

/// Generator for binding artifacts.
#[derive(Debug, Clone)]
pub struct DenoGenerator {
    /// Library identifier passed to `Deno.dlopen`
    library: String,

    /// Output format
    format: EmitFormat,
}

impl DenoGenerator {
    /// Create a generator binding against `library`.
    pub fn new(library: impl Into<String>) -> Self {
        DenoGenerator {
            library: library.into(),
            format: EmitFormat::Deno,
        }
    }

    /// Set the output format.
    pub fn with_format(mut self, format: EmitFormat) -> Self {
        self.format = format;
        self
    }

    /// Render the artifact.
    pub fn generate(&self, symbols: &SymbolTable) -> Result<String> {
        match self.format {
            EmitFormat::Deno => Ok(self.generate_module(symbols)),
            EmitFormat::Json => {
                let mut json = serde_json::to_string_pretty(symbols)
                    .context("failed to serialize symbol table")?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    fn generate_module(&self, symbols: &SymbolTable) -> String {
        let mut out = String::new();

        out.push_str("// Generated by ffigen. Do not edit.\n\n");
        out.push_str("const symbols = {\n");
        for (name, symbol) in symbols.iter() {
            let parameters: Vec<String> =
                symbol.parameters.iter().map(|p| p.as_deno()).collect();
            writeln!(out, "  // {}", symbol.doc).unwrap();
            writeln!(
                out,
                "  {}: {{ parameters: [{}], result: {} }},",
                js_string(name),
                parameters.join(", "),
                symbol.result.as_deno()
            )
            .unwrap();
        }
        out.push_str("} as const;\n\n");

        writeln!(
            out,
            "const library = Deno.dlopen({}, symbols);\n",
            js_string(&self.library)
        )
        .unwrap();
        out.push_str("export default library.symbols;\n");

        out
    }
}

/// Quote a string as a JavaScript literal. JSON string syntax is a subset.
fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}
