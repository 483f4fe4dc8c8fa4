// Integration tests for the exchange interpreter

use exchanger::interpreter::engine::Interpreter;
use exchanger::interpreter::errors::RuntimeError;
use exchanger::memory::value::Value;
use exchanger::parser::parse::Parser;
use exchanger::EXAMPLE_SOURCE;

fn interpreter_for(source: &str) -> Interpreter {
    let mut parser = Parser::new(source).expect("Parser creation failed");
    let program = parser.parse_program().expect("Parsing failed");
    Interpreter::new(program, 1024 * 1024 * 100) // 100MB limit
}

fn run_ok(source: &str) -> Interpreter {
    let mut interpreter = interpreter_for(source);
    let result = interpreter.run();
    assert!(result.is_ok(), "Execution failed: {:?}", result);
    interpreter
}

fn run_err(source: &str) -> RuntimeError {
    let mut interpreter = interpreter_for(source);
    interpreter.run().expect_err("Execution should fail")
}

#[test]
fn test_bundled_example_exchanges_globals() {
    let interpreter = run_ok(EXAMPLE_SOURCE);

    assert!(interpreter.is_finished());
    assert_eq!(interpreter.read_variable("a"), Some(Value::Int(1338)));
    assert_eq!(interpreter.read_variable("b"), Some(Value::Int(1337)));
    assert!(interpreter.function_defs().contains_key("swap"));
}

#[test]
fn test_builtin_swap_without_definition() {
    let source = r#"
        int a = 1337;
        int b = 1338;
        swap(&a, &b);
    "#;
    let interpreter = run_ok(source);

    assert_eq!(interpreter.read_variable("a"), Some(Value::Int(1338)));
    assert_eq!(interpreter.read_variable("b"), Some(Value::Int(1337)));
}

#[test]
fn test_swap_through_pointer_variables() {
    let source = r#"
        int a = 5;
        int b = -9;
        int *pa = &a;
        int *pb = &b;
        swap(pa, pb);
    "#;
    let interpreter = run_ok(source);

    assert_eq!(interpreter.read_variable("a"), Some(Value::Int(-9)));
    assert_eq!(interpreter.read_variable("b"), Some(Value::Int(5)));
}

#[test]
fn test_swapping_twice_restores_values() {
    let source = r#"
        void swap(int *c, int *d) {
          const int tmp = *c;
          *c = *d;
          *d = tmp;
        }

        int a = 0;
        int b = 2147483647;
        swap(&a, &b);
        swap(&a, &b);
    "#;
    let interpreter = run_ok(source);

    assert_eq!(interpreter.read_variable("a"), Some(Value::Int(0)));
    assert_eq!(interpreter.read_variable("b"), Some(Value::Int(2147483647)));
}

#[test]
fn test_swap_with_itself_is_noop() {
    let builtin = run_ok("int a = 1337;\nswap(&a, &a);\n");
    assert_eq!(builtin.read_variable("a"), Some(Value::Int(1337)));

    let defined = run_ok(
        r#"
        void swap(int *c, int *d) {
          const int tmp = *c;
          *c = *d;
          *d = tmp;
        }
        int a = -1;
        swap(&a, &a);
    "#,
    );
    assert_eq!(defined.read_variable("a"), Some(Value::Int(-1)));
}

#[test]
fn test_swap_pointer_values() {
    let source = r#"
        int a = 1;
        int b = 2;
        int *p = &a;
        int *q = &b;
        swap(&p, &q);
        *p = 20;
    "#;
    let interpreter = run_ok(source);

    // p now points at b
    assert_eq!(interpreter.read_variable("b"), Some(Value::Int(20)));
    assert_eq!(interpreter.read_variable("a"), Some(Value::Int(1)));
}

#[test]
fn test_main_with_locals() {
    let source = r#"
        void swap(int *c, int *d) {
          const int tmp = *c;
          *c = *d;
          *d = tmp;
        }

        int main() {
          int x = 7;
          int y = -42;
          int *px = &x;
          swap(px, &y);
          return x;
        }
    "#;
    let interpreter = run_ok(source);

    let returned: Vec<Value> = interpreter
        .snapshots()
        .filter_map(|snapshot| snapshot.return_value)
        .collect();
    assert_eq!(returned, vec![Value::Int(-42)]);

    // Locals are gone once main returns
    assert_eq!(interpreter.stack().depth(), 1);
    assert_eq!(interpreter.read_variable("x"), None);
}

#[test]
fn test_function_returning_value() {
    let source = r#"
        int pick(int *p) {
            return *p;
        }
        int a = 3;
        int b = 4;
        swap(&a, &b);
        int c = pick(&a);
    "#;
    let interpreter = run_ok(source);
    assert_eq!(interpreter.read_variable("c"), Some(Value::Int(4)));
}

#[test]
fn test_null_initialisation() {
    let interpreter = run_ok("int *p = NULL;\nint *q = 0;\n");
    assert_eq!(interpreter.read_variable("p"), Some(Value::Null));
    assert_eq!(interpreter.read_variable("q"), Some(Value::Null));
}

#[test]
fn test_undefined_variable() {
    let err = run_err("int a = 1;\nswap(&a, &missing);\n");
    assert!(
        matches!(err, RuntimeError::UndefinedVariable { ref name, .. } if name == "missing"),
        "unexpected error: {:?}",
        err
    );
}

#[test]
fn test_undefined_function() {
    let err = run_err("int a = 1;\nrotate(&a);\n");
    assert!(matches!(err, RuntimeError::UndefinedFunction { ref name, .. } if name == "rotate"));
}

#[test]
fn test_swapping_const_is_rejected() {
    let err = run_err("const int a = 1;\nint b = 2;\nswap(&a, &b);\n");
    assert!(matches!(err, RuntimeError::ConstModification { ref var, .. } if var == "a"));
}

#[test]
fn test_assigning_const_local_is_rejected() {
    let source = r#"
        void swap(int *c, int *d) {
          const int tmp = *c;
          tmp = *d;
        }
        int a = 1;
        int b = 2;
        swap(&a, &b);
    "#;
    let err = run_err(source);
    assert!(matches!(err, RuntimeError::ConstModification { ref var, .. } if var == "tmp"));
}

#[test]
fn test_null_dereference() {
    let err = run_err("int a = 1;\nint *p = NULL;\nswap(p, &a);\n");
    assert!(matches!(err, RuntimeError::NullDereference { .. }));

    let location = err.location().copied();
    assert_eq!(location.map(|l| l.line), Some(3));
}

#[test]
fn test_argument_count_mismatch() {
    let err = run_err("int a = 1;\nswap(&a);\n");
    assert!(matches!(
        err,
        RuntimeError::ArgumentCountMismatch {
            expected: 2,
            got: 1,
            ..
        }
    ));

    let source = r#"
        void swap(int *c, int *d) {
          const int tmp = *c;
          *c = *d;
          *d = tmp;
        }
        int a = 1;
        int b = 2;
        swap(&a, &b, &a);
    "#;
    let err = run_err(source);
    assert!(matches!(
        err,
        RuntimeError::ArgumentCountMismatch {
            expected: 2,
            got: 3,
            ..
        }
    ));
}

#[test]
fn test_mismatched_types_are_rejected() {
    let err = run_err("int a = 1;\nint *p = &a;\nswap(&a, &p);\n");
    assert!(matches!(err, RuntimeError::TypeError { .. }), "got {:?}", err);

    let err = run_err("int a = 1;\nswap(a, &a);\n");
    assert!(matches!(err, RuntimeError::TypeError { .. }), "got {:?}", err);
}

#[test]
fn test_uninitialized_read() {
    let err = run_err("int a;\nint b = a;\n");
    assert!(matches!(err, RuntimeError::UninitializedRead { ref var, .. } if var == "a"));
}

#[test]
fn test_redeclaration() {
    let err = run_err("int a = 1;\nint a = 2;\n");
    assert!(matches!(err, RuntimeError::Redeclaration { ref name, .. } if name == "a"));
}

#[test]
fn test_unbounded_recursion_overflows() {
    let source = r#"
        int loop(int *p) {
            return loop(p);
        }
        int a = 1;
        int b = loop(&a);
    "#;
    let err = run_err(source);
    assert!(matches!(err, RuntimeError::StackOverflow { .. }));
}

#[test]
fn test_parse_errors() {
    assert!(Parser::new("int a = 1 + 2;").is_err());

    let mut parser = Parser::new("int a = 1\nint b = 2;").expect("Lexing failed");
    assert!(parser.parse_program().is_err());

    let mut parser = Parser::new("void v;").expect("Lexing failed");
    assert!(parser.parse_program().is_err());
}

#[test]
fn test_pointer_into_popped_frame_is_rejected() {
    let source = r#"
        int *g = NULL;
        int out = 0;
        void f() {
            int x = 1;
            g = &x;
        }
        void h() {
            int y = 99;
            *g = 5;
            out = y;
        }
        f();
        h();
    "#;
    let mut interpreter = interpreter_for(source);
    let err = interpreter.run().expect_err("Execution should fail");

    assert!(
        matches!(err, RuntimeError::InvalidPointer { .. }),
        "unexpected error: {:?}",
        err
    );
    assert_eq!(interpreter.read_variable("out"), Some(Value::Int(0)));
}

#[test]
fn test_swap_through_dangling_pointer_is_rejected() {
    let source = r#"
        int *g = NULL;
        int a = 1;
        void f() {
            int x = 2;
            g = &x;
        }
        void h() {
            int y = 3;
            swap(g, &a);
        }
        f();
        h();
    "#;
    let mut interpreter = interpreter_for(source);
    let err = interpreter.run().expect_err("Execution should fail");

    assert!(matches!(err, RuntimeError::InvalidPointer { .. }), "got {:?}", err);
    assert_eq!(interpreter.read_variable("a"), Some(Value::Int(1)));
}

#[test]
fn test_write_through_pointer_to_const_is_rejected() {
    let err = run_err("int a = 1;\nconst int *p = &a;\n*p = 5;\n");
    assert!(matches!(err, RuntimeError::ConstModification { ref var, .. } if var == "a"));

    let err = run_err("int a = 1;\nint b = 2;\nconst int *p = &a;\nswap(p, &b);\n");
    assert!(matches!(err, RuntimeError::ConstModification { ref var, .. } if var == "a"));
}

#[test]
fn test_pointer_to_const_can_be_reseated() {
    let interpreter = run_ok("int a = 1;\nint b = 2;\nconst int *p = &a;\np = &b;\nint c = *p;\n");
    assert_eq!(interpreter.read_variable("c"), Some(Value::Int(2)));
}

#[test]
fn test_const_pointer_cannot_be_reseated() {
    let err = run_err("int a = 1;\nint b = 2;\nint *const p = &a;\np = &b;\n");
    assert!(matches!(err, RuntimeError::ConstModification { ref var, .. } if var == "p"));

    // The pointee stays writable
    let interpreter = run_ok("int a = 1;\nint *const p = &a;\n*p = 7;\n");
    assert_eq!(interpreter.read_variable("a"), Some(Value::Int(7)));
}

#[test]
fn test_pointer_to_const_does_not_convert_to_plain_pointer() {
    let err = run_err("const int a = 1;\nint *p = &a;\n");
    assert!(matches!(err, RuntimeError::TypeError { .. }), "got {:?}", err);

    let err = run_err("int a = 1;\nconst int *p = &a;\nint *q = p;\n");
    assert!(matches!(err, RuntimeError::TypeError { .. }), "got {:?}", err);
}

#[test]
fn test_only_literal_zero_becomes_null() {
    let err = run_err("int z = 0;\nint *p = z;\n");
    assert!(matches!(err, RuntimeError::TypeError { .. }), "got {:?}", err);

    let interpreter = run_ok("int a = 1;\nint *p = &a;\np = 0;\n");
    assert_eq!(interpreter.read_variable("p"), Some(Value::Null));
}

#[test]
fn test_top_level_return_skips_main() {
    let source = r#"
        int ran = 0;
        int main() {
            ran = 1;
            return 0;
        }
        return;
    "#;
    let interpreter = run_ok(source);

    assert!(interpreter.is_finished());
    assert_eq!(interpreter.read_variable("ran"), Some(Value::Int(0)));
}
