//! File-based library entry points

use calcc::frontend::{CompileConfig, ErrorRecoveryStrategy};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_emit_ir_file() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("prog.calc");
    let out = dir.path().join("prog.ll");
    fs::write(&src, "int x = 5; x = x + 3;").unwrap();

    calcc::emit_ir_file(&src, &out, &CompileConfig::default()).unwrap();

    let ir = fs::read_to_string(&out).unwrap();
    assert!(ir.starts_with("; ModuleID = 'main'"));
    assert!(ir.contains("declare void @main_write(i32)"));
    assert!(ir.contains("call void @main_write(i32 %t1)"));
    assert!(ir.contains("ret i32 0"));
}

#[test]
fn test_emit_ir_file_reports_compile_errors() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("bad.calc");
    let out = dir.path().join("bad.ll");
    fs::write(&src, "int x; y = 2;").unwrap();

    let err = calcc::emit_ir_file(&src, &out, &CompileConfig::default()).unwrap_err();
    assert!(err.to_string().contains("E1001"));
    assert!(!out.exists());
}

#[test]
fn test_missing_source_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.calc");
    let err = calcc::run_file(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn test_config_from_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("calcc.json");
    fs::write(
        &path,
        r#"{ "error_recovery": "skip_statement", "max_exponent": 3, "module_name": "calc" }"#,
    )
    .unwrap();

    let config = CompileConfig::from_json_file(&path).unwrap();
    assert_eq!(config.error_recovery, ErrorRecoveryStrategy::SkipStatement);
    assert_eq!(config.max_exponent, Some(3));
    assert!(!config.verbose);

    let err = calcc::compile("t.calc", "int x = 2; x = x ^ 4;", &config).unwrap_err();
    assert!(err.to_string().contains("between 0 and 3"));
    let module = calcc::compile("t.calc", "int x = 2; x = x ^ 3;", &config).unwrap();
    assert_eq!(module.name, "calc");
}
