//! Generated-program properties

use calcc::backends::{Interpreter, RecordingRuntime};
use calcc::frontend::core::parser::{parse_source, Stmt};
use calcc::frontend::Compiler;
use calcc::middle::WRITE_FN;
use proptest::prelude::*;

fn run(source: &str) -> Vec<i32> {
    let module = Compiler::new().compile("prop.calc", source).unwrap();
    let mut runtime = RecordingRuntime::new();
    Interpreter::new().run(&module, &mut runtime).unwrap();
    runtime.writes
}

proptest! {
    #[test]
    fn statement_count_matches_source(values in prop::collection::vec(0i32..1000, 0..20)) {
        let mut source = String::from("int x;");
        for v in &values {
            source.push_str(&format!(" x = {};", v));
        }
        let program = parse_source(&source).unwrap();
        prop_assert_eq!(program.stmts.len(), values.len() + 1);
        prop_assert!(matches!(program.stmts[0], Stmt::Declaration(_)));
        prop_assert!(program.stmts[1..].iter().all(|s| matches!(s, Stmt::Assignment(_))));
    }

    #[test]
    fn each_assignment_writes_once(values in prop::collection::vec(0i32..1000, 1..20)) {
        let mut source = String::from("int x;");
        for v in &values {
            source.push_str(&format!(" x = {};", v));
        }
        let module = Compiler::new().compile("prop.calc", &source).unwrap();
        prop_assert_eq!(module.count_calls(WRITE_FN), values.len());
        prop_assert_eq!(run(&source), values);
    }

    #[test]
    fn declarations_never_write(names in 1usize..12, init in prop::option::of(0i32..100)) {
        let list: Vec<String> = (0..names).map(|i| format!("v{}", i)).collect();
        let source = match init {
            Some(v) => format!("int {} = {};", list.join(", "), v),
            None => format!("int {};", list.join(", ")),
        };
        let module = Compiler::new().compile("prop.calc", &source).unwrap();
        prop_assert_eq!(module.count_calls(WRITE_FN), 0);
        prop_assert_eq!(module.function("main").unwrap().slots.len(), names);
    }

    #[test]
    fn loop_runs_exactly_k_times(k in 0i32..50) {
        let source = format!("int i = 0, n = {}; loopc i < n : begin i += 1; end", k);
        let expected: Vec<i32> = (1..=k).collect();
        prop_assert_eq!(run(&source), expected);
    }

    #[test]
    fn pow_matches_repeated_multiplication(base in 0i32..12, exp in 0u32..10) {
        let source = format!("int b = {}, r; r = b ^ {};", base, exp);
        let expected = base.wrapping_pow(exp);
        prop_assert_eq!(run(&source), vec![expected]);
    }

    #[test]
    fn exactly_one_branch_runs(x in -20i32..20) {
        let init = if x < 0 { format!("0 - {}", -x) } else { x.to_string() };
        let source = format!(
            "int x = {}, r; \
             if x < 0 - 10 : begin r = 1; end \
             elif x < 0 : begin r = 2; end \
             elif x == 0 : begin r = 3; end \
             else : begin r = 4; end",
            init
        );
        let expected = if x < -10 {
            1
        } else if x < 0 {
            2
        } else if x == 0 {
            3
        } else {
            4
        };
        prop_assert_eq!(run(&source), vec![expected]);
    }
}
