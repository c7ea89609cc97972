//! Binding generation operation.
//!
//! Runs the full pipeline over a decoded declaration stream: typedef
//! resolution over the whole list first, then function signatures, then
//! rendering.

use anyhow::{Context, Result};

use crate::bindings::{
    DefinitionStream, DenoGenerator, EmitFormat, ResolverContext, RunStats, SignatureBuilder,
    SymbolTable, TypedefResolver,
};

/// Options for generating bindings.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Library identifier passed to the runtime's dynamic loader
    pub library: String,

    /// Output format
    pub format: EmitFormat,
}

impl GenerateOptions {
    /// Create options binding against `library`.
    pub fn new(library: impl Into<String>) -> Self {
        GenerateOptions {
            library: library.into(),
            format: EmitFormat::default(),
        }
    }

    /// Set the output format.
    pub fn with_format(mut self, format: EmitFormat) -> Self {
        self.format = format;
        self
    }
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// The rendered binding artifact
    pub artifact: String,

    /// Every symbol that was bound
    pub symbols: SymbolTable,

    /// Run counters
    pub stats: RunStats,
}

/// Generate bindings for a decoded declaration stream.
///
/// Unmappable definitions are skipped and counted. A broken input contract
/// aborts the run.
pub fn generate_bindings(
    stream: &DefinitionStream,
    opts: &GenerateOptions,
) -> Result<GenerateResult> {
    let mut ctx = ResolverContext::with_stats(stream.stats.clone());

    tracing::info!("Resolving typedefs");
    TypedefResolver::new(&stream.definitions).resolve_all(&mut ctx);
    tracing::debug!("{} typedefs resolved", ctx.typedef_count());

    tracing::info!("Building function signatures");
    SignatureBuilder::new()
        .build_all(&stream.definitions, &mut ctx)
        .context("declaration stream violates the c2ffi format")?;

    let (symbols, stats) = ctx.into_parts();

    let artifact = DenoGenerator::new(&opts.library)
        .with_format(opts.format)
        .generate(&symbols)?;

    Ok(GenerateResult {
        artifact,
        symbols,
        stats,
    })
}
