//! Source in, observed writes out

use calcc::backends::{Interpreter, RecordingRuntime};
use calcc::frontend::Compiler;
use calcc::middle::WRITE_FN;

fn writes(source: &str) -> Vec<i32> {
    let module = Compiler::new()
        .compile("test.calc", source)
        .unwrap_or_else(|e| panic!("compile failed: {}", e));
    let mut runtime = RecordingRuntime::new();
    Interpreter::new().run(&module, &mut runtime).unwrap();
    runtime.writes
}

#[test]
fn test_simple_assignment() {
    assert_eq!(writes("int x = 5; x = x + 3;"), [8]);
}

#[test]
fn test_compound_assignment() {
    assert_eq!(writes("int x = 10; x -= 4;"), [6]);
}

#[test]
fn test_if_taken() {
    assert_eq!(writes("int x = 5; if x > 3 : begin x = x + 1; end"), [6]);
}

#[test]
fn test_if_else() {
    assert_eq!(
        writes("int x = 2; if x > 3 : begin x = x + 1; end else : begin x = x - 1; end"),
        [1]
    );
}

#[test]
fn test_loop_counts_to_three() {
    assert_eq!(
        writes("int x = 0; loopc x < 3 : begin x = x + 1; end"),
        [1, 2, 3]
    );
}

#[test]
fn test_power() {
    assert_eq!(writes("int x = 2; x = x ^ 3;"), [8]);
}

#[test]
fn test_power_zero_and_one() {
    assert_eq!(writes("int x = 9, y; y = x ^ 0; y = x ^ 1;"), [1, 9]);
}

#[test]
fn test_large_exponent() {
    assert_eq!(writes("int x = 1; x = x ^ 100;"), [1]);
    assert_eq!(writes("int x = 0 - 1; x = x ^ 101;"), [-1]);
}

#[test]
fn test_declaration_is_silent() {
    let module = Compiler::new()
        .compile("test.calc", "int a, b, c = 4;")
        .unwrap();
    assert_eq!(module.count_calls(WRITE_FN), 0);
    assert!(writes("int a, b, c = 4;").is_empty());
}

#[test]
fn test_factorial() {
    let source = "
        int n = 5, acc = 1;
        loopc n > 1 : begin
            acc *= n;
            n -= 1;
        end
    ";
    assert_eq!(writes(source), [5, 4, 20, 3, 60, 2, 120, 1]);
}

#[test]
fn test_fizzbuzz_style_chain() {
    let source = "
        int i = 0, r;
        loopc i < 6 : begin
            i += 1;
        end
        if i % 6 == 0 : begin r = 6; end
        elif i % 3 == 0 : begin r = 3; end
        elif i % 2 == 0 : begin r = 2; end
        else : begin r = 1; end
    ";
    assert_eq!(writes(source), [1, 2, 3, 4, 5, 6, 6]);
}

#[test]
fn test_operator_precedence() {
    assert_eq!(writes("int r; r = 2 + 3 * 4;"), [14]);
    assert_eq!(writes("int r; r = (2 + 3) * 4;"), [20]);
    assert_eq!(writes("int r; r = 2 * 3 ^ 2;"), [18]);
    assert_eq!(writes("int r; r = 10 - 4 - 3;"), [3]);
    assert_eq!(writes("int r; r = 20 / 2 % 3;"), [1]);
}

#[test]
fn test_conditions_do_not_short_circuit() {
    // `or` still evaluates the right-hand side, including its division
    let module = Compiler::new()
        .compile("t.calc", "int x = 0, r; if x == 0 or 1 / x == 1 : begin r = 1; end")
        .unwrap();
    let mut runtime = RecordingRuntime::new();
    assert!(Interpreter::new().run(&module, &mut runtime).is_err());
}

#[test]
fn test_comments_and_whitespace() {
    let source = "int x = 1; // counter\n\tx += 1; // bump\n";
    assert_eq!(writes(source), [2]);
}
