//! calcc - CLI

use anyhow::{Context, Result};
use calcc::backends::{Interpreter, StdRuntime};
use calcc::frontend::{CompileConfig, Compiler, ErrorRecoveryStrategy};
use calcc::middle::ModuleIR;
use calcc::util::diagnostic::DiagnosticRenderer;
use calcc::util::logger::{self, LogLevel};
use calcc::util::span::SourceFile;
use calcc::{NAME, VERSION};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Compiler for a small calculator language
#[derive(Parser, Debug)]
#[command(name = "calcc")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Keep parsing after a syntax error and report every error found
    #[arg(long, global = true)]
    recover: bool,

    /// JSON compile configuration
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile and run a source file
    Run {
        /// Source file to run
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Compile and run code from the command line
    Eval {
        /// Code to evaluate
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Check a source file for errors without running it
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the IR of a source file
    EmitIr {
        /// Source file to compile
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

fn load_config(args: &Args) -> Result<CompileConfig> {
    let mut config = match &args.config {
        Some(path) => CompileConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => CompileConfig::new(),
    };
    if args.recover {
        config = config.with_error_recovery(ErrorRecoveryStrategy::SkipStatement);
    }
    if args.verbose {
        config = config.verbose(true);
    }
    Ok(config)
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Compile, printing diagnostics on failure
fn compile_reported(
    config: &CompileConfig,
    colors: bool,
    name: &str,
    source: &str,
) -> Option<ModuleIR> {
    let mut compiler = Compiler::with_config(config.clone());
    match compiler.compile(name, source) {
        Ok(module) => Some(module),
        Err(e) => {
            let renderer = if colors {
                DiagnosticRenderer::new()
            } else {
                DiagnosticRenderer::new().without_colors()
            };
            let file = SourceFile::new(name, source);
            eprint!("{}", renderer.render_all(&e.diagnostics(), Some(&file)));
            None
        }
    }
}

fn execute(module: &ModuleIR) -> Result<()> {
    let mut runtime = StdRuntime::stdio();
    Interpreter::new()
        .run(module, &mut runtime)
        .context("Program aborted")?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = load_config(&args)?;
    if config.verbose {
        logger::init_with_level(LogLevel::Debug);
    } else {
        logger::init();
    }
    let colors = !args.no_color && std::io::stderr().is_terminal();

    let module = match &args.command {
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Eval { code } => compile_reported(&config, colors, "<eval>", code),
        Commands::Run { file } | Commands::Check { file } | Commands::EmitIr { file, .. } => {
            let source = read_source(file)?;
            compile_reported(&config, colors, &file.display().to_string(), &source)
        }
    };
    let Some(module) = module else {
        return Ok(ExitCode::FAILURE);
    };

    match &args.command {
        Commands::Run { .. } | Commands::Eval { .. } => execute(&module)?,
        Commands::Check { file } => eprintln!("{}: no errors", file.display()),
        Commands::EmitIr {
            output: Some(out), ..
        } => std::fs::write(out, module.to_string())
            .with_context(|| format!("Failed to write IR: {}", out.display()))?,
        Commands::EmitIr { output: None, .. } => print!("{}", module),
        Commands::Version => {}
    }

    Ok(ExitCode::SUCCESS)
}
