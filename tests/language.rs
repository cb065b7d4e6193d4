use pretty_assertions::assert_eq;
use tally::{Config, Engine, Error, ParseError, RuntimeError, Scoping};

fn assert_value(src: &str, expected: f64) {
    match tally::run(src) {
        Ok(value) => assert_eq!(value.as_number(), expected, "script:\n{src}"),
        Err(e) => panic!("script failed:\n{src}\nError: {e:?}"),
    }
}

fn run_err(src: &str) -> Error {
    tally::run(src).expect_err("script should fail")
}

const SUM_OR_A: &str = "
    fn sumOrA(condition, a, b) {
        if condition { a + b } else { a }
    }
";

#[test]
fn precedence() {
    assert_value("2 + 3 * 4", 14.0);
    assert_value("(2 + 3) * 4", 20.0);
}

#[test]
fn associativity() {
    assert_value("10 - 3 - 2", 5.0);
}

#[test]
fn variable_round_trip() {
    let mut engine = Engine::new();
    engine.run("ref x = 7").unwrap();
    assert_eq!(engine.run("x").unwrap().as_number(), 7.0);

    engine.run("ref x = 9").unwrap();
    assert_eq!(engine.run("x").unwrap().as_number(), 9.0);
}

#[test]
fn function_call_end_to_end() {
    assert_value(&format!("{SUM_OR_A} sumOrA(1, (5 + 4), (3 + 2 + 1))"), 15.0);
    assert_value(&format!("{SUM_OR_A} sumOrA(0, (5 + 4), (3 + 2 + 1))"), 9.0);
}

#[test]
fn truthiness_boundary() {
    assert_value("ref c = 1 if c { 10 } else { 20 }", 10.0);
    assert_value("ref c = 0.999 if c { 10 } else { 20 }", 20.0);
}

#[test]
fn undefined_identifier() {
    assert_eq!(
        run_err("ghost + 1"),
        Error::Runtime(RuntimeError::NotDefined("ghost".into()))
    );
}

#[test]
fn arity_mismatch() {
    let err = run_err("fn pair(a, b) { a } pair(1, 2, 3)");
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::InvalidParameterCount { expected: 2, found: 3, .. })
    ));
    assert_eq!(err.code(), "T0202");
}

#[test]
fn while_loop_runs_three_times() {
    let src = "
        ref counter = 0
        ref iterations = 0
        while 3 - counter {
            ref counter = counter + 1
            ref iterations = iterations + 1
            counter * 100
        }
    ";

    let mut engine = Engine::new();
    assert_eq!(engine.run(src).unwrap().as_number(), 300.0);
    assert_eq!(engine.environment().lookup_variable("iterations"), Ok(3.0));
    assert_eq!(engine.environment().lookup_variable("counter"), Ok(3.0));
}

#[test]
fn number_then_identifier_lexes_as_two_tokens() {
    let tokens = tally::tokenize("5x").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].lexeme, "5");
    assert_eq!(tokens[1].lexeme, "x");

    // Two statements, the last of which is an unbound name.
    assert_eq!(
        run_err("5x"),
        Error::Runtime(RuntimeError::NotDefined("x".into()))
    );
}

#[test]
fn pi_is_predefined() {
    assert_value("PI", std::f64::consts::PI);
    assert_value("ref r = 2 PI * r * r", std::f64::consts::PI * 4.0);
}

#[test]
fn lexical_errors_carry_position_and_fragment() {
    match run_err("ref a = 1\nref b = a ; 2") {
        Error::Lex(e) => {
            assert_eq!(e.fragment, ";");
            assert_eq!((e.span.line, e.span.column), (2, 10));
        }
        other => panic!("expected a lexical error, got {other:?}"),
    }
}

#[test]
fn parse_errors_stop_before_evaluation() {
    let mut engine = Engine::new();
    let err = engine.run("ref kept = 1 ref = 2").unwrap_err();

    assert!(matches!(err, Error::Parse(ParseError::ExpectedIdentifier { .. })));
    assert!(!engine.environment().contains("kept"));
}

#[test]
fn runtime_errors_keep_earlier_bindings() {
    let mut engine = Engine::new();
    assert!(engine.run("ref kept = 1 missing").is_err());
    assert_eq!(engine.environment().lookup_variable("kept"), Ok(1.0));
}

#[test]
fn function_redefinition_replaces_the_old_body() {
    assert_value("fn f() { 1 } fn f() { 2 } f()", 2.0);
    assert_value("fn f() { 1 } ref f = 5 f", 5.0);
}

#[test]
fn functions_call_functions() {
    let src = "
        fn square(v) { v * v }
        fn hyp2(a, b) { square(a) + square(b) }
        hyp2(3, 4)
    ";
    assert_value(src, 25.0);
}

#[test]
fn loops_inside_functions() {
    let src = "
        fn sumTo(n) {
            ref total = 0
            ref i = 0
            while n - i {
                ref i = i + 1
                ref total = total + i
            }
            total
        }
        sumTo(10)
    ";
    assert_value(src, 55.0);
}

#[test]
fn parameters_share_the_global_table_by_default() {
    let mut engine = Engine::new();

    engine.run("ref a = 1 fn id(a) { a }").unwrap();
    assert_eq!(engine.run("id(5)").unwrap().as_number(), 5.0);
    assert!(!engine.environment().contains("a"));

    let mut framed = Engine::with_config(Config {
        scoping: Scoping::Frames,
        ..Config::default()
    });
    framed.run("ref a = 1 fn id(a) { a }").unwrap();
    assert_eq!(framed.run("id(5)").unwrap().as_number(), 5.0);
    assert_eq!(framed.environment().lookup_variable("a"), Ok(1.0));
}

#[test]
fn function_body_updates_a_global() {
    assert_value(
        "ref count = 0 fn bump() { ref count = count + 1 } bump() bump() count",
        2.0,
    );
}

#[test]
fn function_defined_in_a_body_outlives_the_call() {
    assert_value("fn outer() { fn helper() { 5 } 0 } outer() helper()", 5.0);
}

#[test]
fn body_bindings_outlive_the_call_with_frames_too() {
    let mut engine = Engine::with_config(Config {
        scoping: Scoping::Frames,
        ..Config::default()
    });
    let src = "
        ref count = 0
        fn bump() { ref count = count + 1 }
        fn outer() { fn helper() { 5 } 0 }
        bump() bump() outer()
    ";

    engine.run(src).unwrap();
    assert_eq!(engine.run("count").unwrap().as_number(), 2.0);
    assert_eq!(engine.run("helper()").unwrap().as_number(), 5.0);
}

#[test]
fn deep_nesting_is_a_parse_error() {
    let src = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
    let err = run_err(&src);
    assert!(matches!(err, Error::Parse(ParseError::NestingTooDeep { .. })));
    assert_eq!(err.code(), "T0106");

    let src = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_value(&src, 1.0);
}

#[test]
fn nesting_limit_comes_from_config() {
    let config = Config::from_json_str(r#"{ "max_nesting_depth": 2 }"#).unwrap();
    let mut engine = Engine::with_config(config);

    assert_eq!(engine.run("((4))").unwrap().as_number(), 4.0);
    assert!(matches!(
        engine.run("(((4)))"),
        Err(Error::Parse(ParseError::NestingTooDeep { limit: 2, .. }))
    ));
}

#[test]
fn trailing_decimal_point() {
    assert_value("5. * 2", 10.0);
}

#[test]
fn host_can_bind_inputs() {
    let mut engine = Engine::new();
    engine.environment_mut().define_variable("input", 21.0);
    assert_eq!(engine.run("input * 2").unwrap().as_number(), 42.0);
}

#[test]
fn config_constants_are_visible() {
    let config = Config::from_json_str(r#"{ "constants": { "RATE": 0.5 } }"#).unwrap();
    let mut engine = Engine::with_config(config);
    assert_eq!(engine.run("RATE * 10").unwrap().as_number(), 5.0);
}
