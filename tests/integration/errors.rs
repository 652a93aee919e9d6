//! Compile-time and runtime failures

use calcc::backends::{ExecutorError, Interpreter, RecordingRuntime};
use calcc::frontend::{CompileConfig, CompileError, Compiler, ErrorRecoveryStrategy};
use calcc::util::diagnostic::DiagnosticRenderer;
use calcc::util::span::SourceFile;

fn compile_err(source: &str) -> CompileError {
    Compiler::new()
        .compile("test.calc", source)
        .expect_err("source should not compile")
}

fn codes(err: &CompileError) -> Vec<String> {
    err.diagnostics().into_iter().map(|d| d.code).collect()
}

#[test]
fn test_missing_identifier() {
    let err = compile_err("int ;");
    assert!(matches!(err, CompileError::Parse(ref errors) if errors.len() == 1));
    assert_eq!(codes(&err), ["E0002"]);
    assert!(err.to_string().contains("Expected identifier"));
}

#[test]
fn test_unknown_character() {
    let err = compile_err("int x = 3 $ 4;");
    assert_eq!(codes(&err), ["E0001"]);
}

#[test]
fn test_integer_out_of_range() {
    let err = compile_err("int x = 99999999999;");
    assert_eq!(codes(&err), ["E0003"]);
}

#[test]
fn test_missing_semicolon() {
    let err = compile_err("int x = 1 x = 2;");
    assert_eq!(codes(&err), ["E0002"]);
}

#[test]
fn test_unterminated_block() {
    let err = compile_err("int x; if x > 0 : begin x = 1;");
    assert_eq!(codes(&err), ["E0002"]);
}

#[test]
fn test_semantic_errors() {
    assert_eq!(codes(&compile_err("y = 1;")), ["E1001"]);
    assert_eq!(codes(&compile_err("int x; int x;")), ["E1002"]);
    assert_eq!(codes(&compile_err("int x, k = 2; x = x ^ k;")), ["E1003"]);
}

#[test]
fn test_first_semantic_error_wins() {
    let err = compile_err("int x; a = 1; int x;");
    assert_eq!(codes(&err), ["E1001"]);
}

#[test]
fn test_recovery_mode_reports_every_syntax_error() {
    let config = CompileConfig::new().with_error_recovery(ErrorRecoveryStrategy::SkipStatement);
    let err = Compiler::with_config(config)
        .compile("test.calc", "int ; int x = ; int y; y = 1 +;")
        .unwrap_err();
    assert_eq!(codes(&err), ["E0002", "E0002", "E0002"]);
}

#[test]
fn test_rendered_diagnostic() {
    let source = "int x = 1;\nx = y + 1;\n";
    let err = compile_err(source);
    let file = SourceFile::new("test.calc", source);
    let text = DiagnosticRenderer::new()
        .without_colors()
        .render_all(&err.diagnostics(), Some(&file));
    assert!(text.starts_with("error[E1001]: Use of undeclared variable 'y'\n"));
    assert!(text.contains("--> test.calc:2:5"));
    assert!(text.contains("2 | x = y + 1;"));
    assert!(text.contains('^'));
}

#[test]
fn test_library_compile_renders_diagnostics() {
    let err = calcc::compile("bad.calc", "int ;", &CompileConfig::default()).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("error[E0002]"));
    assert!(text.contains("bad.calc:1:5"));
}

#[test]
fn test_division_by_zero_only_at_runtime() {
    let module = Compiler::new()
        .compile("test.calc", "int x = 4, z; x = x / z;")
        .expect("division by zero is not a compile error");
    let mut runtime = RecordingRuntime::new();
    assert_eq!(
        Interpreter::new().run(&module, &mut runtime),
        Err(ExecutorError::DivisionByZero)
    );
    assert!(runtime.writes.is_empty());
}
