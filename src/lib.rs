//! calcc - a compiler for a small calculator language
//!
//! Integer declarations, plain and compound assignment, `+ - * / % ^`,
//! relational conditions joined by `and`/`or`, `if/elif/else` and the
//! pre-test `loopc` loop. Source is lowered to a basic-block IR that can be
//! printed or run by the reference interpreter.
//!
//! # Example
//!
//! ```
//! use calcc::backends::RecordingRuntime;
//!
//! let mut runtime = RecordingRuntime::new();
//! calcc::run_with("int x = 0; loopc x < 3 : begin x = x + 1; end", &mut runtime).unwrap();
//! assert_eq!(runtime.writes, [1, 2, 3]);
//! ```

#![doc(html_root_url = "https://docs.rs/calcc")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod backends;
pub mod frontend;
pub mod middle;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};

use crate::backends::{Interpreter, Runtime, StdRuntime};
use crate::frontend::{CompileConfig, Compiler};
use crate::middle::ModuleIR;
use crate::util::diagnostic::DiagnosticRenderer;
use crate::util::span::SourceFile;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Language version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "calcc";

/// Compile source text to IR, rendering any diagnostics into the error
pub fn compile(
    source_name: &str,
    source: &str,
    config: &CompileConfig,
) -> Result<ModuleIR> {
    let mut compiler = Compiler::with_config(config.clone());
    compiler.compile(source_name, source).map_err(|e| {
        let file = SourceFile::new(source_name, source);
        let rendered = DiagnosticRenderer::new()
            .without_colors()
            .render_all(&e.diagnostics(), Some(&file));
        anyhow::anyhow!("{}", rendered.trim_end())
    })
}

/// Compile and run source code against `runtime`
pub fn run_with(
    source: &str,
    runtime: &mut dyn Runtime,
) -> Result<i32> {
    debug!("run_with called");
    let module = compile("<eval>", source, &CompileConfig::default())?;
    let code = Interpreter::new().run(&module, runtime)?;
    Ok(code)
}

/// Compile and run source code on stdin/stdout
pub fn run(source: &str) -> Result<i32> {
    let mut runtime = StdRuntime::stdio();
    run_with(source, &mut runtime)
}

/// Compile and run a file on stdin/stdout
pub fn run_file(path: &Path) -> Result<i32> {
    debug!("Running file {}", path.display());
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let module = compile(&path.display().to_string(), &source, &CompileConfig::default())?;
    let mut runtime = StdRuntime::stdio();
    let code = Interpreter::new().run(&module, &mut runtime)?;
    Ok(code)
}

/// Write the IR text form of a source file
pub fn emit_ir_file(
    source_path: &Path,
    output_path: &Path,
    config: &CompileConfig,
) -> Result<()> {
    let source = fs::read_to_string(source_path)
        .with_context(|| format!("Failed to read source: {}", source_path.display()))?;
    let module = compile(&source_path.display().to_string(), &source, config)?;
    debug!("Writing IR to {}", output_path.display());
    fs::write(output_path, module.to_string())
        .with_context(|| format!("Failed to write IR: {}", output_path.display()))?;
    Ok(())
}
