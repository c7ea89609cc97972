//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

/// ffigen - Generate Deno FFI bindings from c2ffi declarations
///
/// Reads a c2ffi JSON declaration stream (stdin by default) and writes a
/// TypeScript module that binds every mappable function of the library.
#[derive(Parser)]
#[command(name = "ffigen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared library to bind against (e.g. libfoo.so)
    #[arg(short, long, env = "FFIGEN_LIBRARY")]
    pub library: String,

    /// Read declarations from a file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the bindings to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: deno or json
    #[arg(long, default_value = "deno")]
    pub emit: String,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors and the final summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
