//! Integration tests for the `calcc` binary

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn calcc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_calcc"))
}

/// Helper function to create a test file
fn create_test_file(
    dir: &TempDir,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_run_prints_results() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(
        &dir,
        "loop.calc",
        "int x = 0; loopc x < 3 : begin x = x + 1; end",
    );
    let output = calcc().arg("run").arg(&file).output().unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "The result is: 1\nThe result is: 2\nThe result is: 3\n"
    );
}

#[test]
fn test_eval() {
    let output = calcc()
        .args(["eval", "int x = 2; x = x ^ 3;"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "The result is: 8\n");
}

#[test]
fn test_check_valid_file() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "ok.calc", "int x = 1; x += 1;");
    let output = calcc().arg("check").arg(&file).output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("no errors"));
}

#[test]
fn test_check_reports_syntax_error() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "bad.calc", "int ;");
    let output = calcc()
        .arg("--no-color")
        .arg("check")
        .arg(&file)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("error[E0002]: Expected identifier"));
    assert!(err.contains("bad.calc:1:5"));
}

#[test]
fn test_recover_flag_reports_all_errors() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "bad.calc", "int ;\nint y = ;\n");
    let output = calcc()
        .args(["--no-color", "--recover", "check"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert_eq!(stderr(&output).matches("error[E0002]").count(), 2);
}

#[test]
fn test_emit_ir_to_stdout_and_file() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "p.calc", "int x = 5; if x > 3 : begin x = 1; end");

    let output = calcc().arg("emit-ir").arg(&file).output().unwrap();
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("define i32 @main()"));
    assert!(text.contains("if.then:"));

    let out = dir.path().join("p.ll");
    let output = calcc()
        .arg("emit-ir")
        .arg(&file)
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&out).unwrap(), text);
}

#[test]
fn test_runtime_fault_exit_status() {
    let output = calcc()
        .args(["eval", "int x = 1, z; x = x % z;"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Division by zero"));
}

#[test]
fn test_config_flag() {
    let dir = TempDir::new().unwrap();
    let config = create_test_file(&dir, "c.json", r#"{ "max_exponent": 2 }"#);
    let output = calcc()
        .arg("--no-color")
        .arg("--config")
        .arg(&config)
        .args(["eval", "int x = 2; x = x ^ 3;"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("E1003"));
}

#[test]
fn test_version() {
    let output = calcc().arg("version").output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("calcc "));
}
