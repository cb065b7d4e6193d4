/*
 * ==========================================================================
 * TALLY - Count on it.
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the TALLY scripting engine project.
 *
 * TALLY is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

pub mod calls;
pub mod environment;
pub mod expressions;
pub mod helpers;
pub mod statements;

use tracing::debug;

use crate::ast::{Block, Node};
use crate::error::RuntimeError;
use crate::value::Value;

pub use environment::{Binding, CallScope, Environment, Limits};

/// Evaluates a single node and returns its value.
///
/// This is the **core dispatcher** of the interpreter. Every node kind has
/// exactly one rule, and the match is exhaustive.
///
/// Evaluation is fail-fast: the first error aborts the whole remaining
/// evaluation and is returned as-is.
pub fn evaluate(node: &Node, env: &mut Environment) -> Result<Value, RuntimeError> {
    match node {
        Node::Literal(value) => Ok(Value::from(*value)),

        Node::Identifier(name) => expressions::eval_identifier(name, env),

        Node::Infix { operator, left, right } => {
            expressions::eval_infix(*operator, left, right, env)
        }

        Node::VariableDeclaration { name, value } => {
            statements::exec_variable_declaration(name, value, env)
        }

        Node::FunctionDefinition(function) => {
            statements::exec_function_definition(function, env)
        }

        Node::FunctionCall { name, arguments } => calls::call_function(name, arguments, env),

        Node::If { branches, else_body } => {
            statements::exec_if(branches, else_body.as_ref(), env)
        }

        Node::While { conditions, body } => statements::exec_while(conditions, body, env),

        Node::Block(block) => statements::exec_block(block, env),
    }
}

/// Executes a full TALLY program in a fresh environment.
pub fn run(program: &Block) -> Result<Value, RuntimeError> {
    let mut env = Environment::new();
    run_in_env(program, &mut env)
}

/// Executes a program inside an existing environment, keeping whatever
/// it declares.
pub fn run_in_env(program: &Block, env: &mut Environment) -> Result<Value, RuntimeError> {
    let value = statements::exec_block(program, env)?;
    debug!(%value, "program finished");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Scoping};
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn program(source: &str) -> Block {
        let tokens = tokenize(source).unwrap_or_else(|e| panic!("lexing failed: {e}"));
        parse(&tokens).unwrap_or_else(|e| panic!("parsing failed: {e}"))
    }

    fn eval_in(source: &str, env: &mut Environment) -> Result<f64, RuntimeError> {
        run_in_env(&program(source), env).map(|v| v.as_number())
    }

    fn eval(source: &str) -> Result<f64, RuntimeError> {
        eval_in(source, &mut Environment::new())
    }

    fn eval_framed(source: &str) -> Result<f64, RuntimeError> {
        eval_in(source, &mut Environment::with_scoping(Scoping::Frames))
    }

    #[test]
    fn arithmetic() {
        assert_eq!(eval("2 + 3 * 4"), Ok(14.0));
        assert_eq!(eval("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(eval("10 - 3 - 2"), Ok(5.0));
        assert_eq!(eval("8 / 4 / 2"), Ok(1.0));
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        assert_eq!(eval("1 / 0"), Ok(f64::INFINITY));
        assert!(eval("0 / 0").unwrap().is_nan());
    }

    #[test]
    fn block_value_is_its_last_statement() {
        assert_eq!(eval("ref a = 2 ref b = 5 a * b"), Ok(10.0));
        assert_eq!(eval("ref a = 7"), Ok(7.0));
    }

    #[test]
    fn empty_program_has_no_value() {
        assert_eq!(eval(""), Err(RuntimeError::ExpectedExpression));
    }

    #[test]
    fn function_definition_returns_sentinel() {
        assert_eq!(eval("fn f() { 1 }"), Ok(0.0));
    }

    #[test]
    fn function_name_is_not_a_variable() {
        assert_eq!(
            eval("fn f() { 1 } f + 1"),
            Err(RuntimeError::NotDefined("f".into()))
        );
    }

    #[test]
    fn variable_is_not_callable() {
        assert_eq!(
            eval("ref g = 3 g(1)"),
            Err(RuntimeError::NotDefined("g".into()))
        );
    }

    #[test]
    fn arity_is_checked_before_arguments_run() {
        assert_eq!(
            eval("fn add(a, b) { a + b } add(1, 2, missing)"),
            Err(RuntimeError::InvalidParameterCount {
                name: "add".into(),
                expected: 2,
                found: 3,
            })
        );
    }

    #[test]
    fn if_without_else_yields_minus_one() {
        assert_eq!(eval("if 0 { 5 }"), Ok(-1.0));
        assert_eq!(eval("if 1 { 5 }"), Ok(5.0));
    }

    #[test]
    fn else_if_takes_first_true_branch() {
        let src = "ref n = 2 if n - 1 - 1 { 10 } else if n - 1 { 20 } else if n { 30 } else { 40 }";
        assert_eq!(eval(src), Ok(20.0));
    }

    #[test]
    fn while_never_running_yields_zero() {
        assert_eq!(eval("while 0 { 99 }"), Ok(0.0));
    }

    #[test]
    fn while_conditions_are_conjunctive() {
        let mut env = Environment::new();
        let looped = Node::While {
            conditions: vec![Node::identifier("a"), Node::identifier("b")],
            body: program("ref a = a - 1 a * 10"),
        };

        env.define_variable("a", 3.0);
        env.define_variable("b", 0.0);
        assert_eq!(evaluate(&looped, &mut env), Ok(Value::Number(0.0)));
        assert_eq!(env.lookup_variable("a"), Ok(3.0));

        env.define_variable("b", 1.0);
        assert_eq!(evaluate(&looped, &mut env), Ok(Value::Number(0.0)));
        assert_eq!(env.lookup_variable("a"), Ok(0.0));

        env.define_variable("a", 2.5);
        assert_eq!(evaluate(&looped, &mut env), Ok(Value::Number(5.0)));
        assert_eq!(env.lookup_variable("a"), Ok(0.5));
    }

    #[test]
    fn loop_limit_is_enforced() {
        let config = Config {
            max_loop_iterations: Some(10),
            ..Config::default()
        };
        let mut env = Environment::from_config(&config);

        assert_eq!(
            eval_in("while 1 { 1 }", &mut env),
            Err(RuntimeError::IterationLimitExceeded { limit: 10 })
        );
        assert_eq!(eval_in("ref i = 0 while 10 - i { ref i = i + 1 }", &mut env), Ok(10.0));
    }

    #[test]
    fn recursion_is_safe_with_frames() {
        let src = "fn fact(n) { if n { fact(n - 1) * n } else { 1 } } fact(5)";
        assert_eq!(eval_framed(src), Ok(120.0));
    }

    #[test]
    fn shared_recursion_loses_the_parameter() {
        // Reading `n` before the recursive call still works...
        let src = "fn fact(n) { if n { n * fact(n - 1) } else { 1 } } fact(5)";
        assert_eq!(eval(src), Ok(120.0));

        // ...but the inner call removes it before it is read again.
        let src = "fn fact(n) { if n { fact(n - 1) * n } else { 1 } } fact(5)";
        assert_eq!(eval(src), Err(RuntimeError::NotDefined("n".into())));
    }

    #[test]
    fn long_operator_chains_evaluate() {
        let src = format!("0{}", " + 1".repeat(5_000));
        assert_eq!(eval(&src), Ok(5_000.0));
        assert_eq!(eval("100 - 10 * 2 - 30 / 3 + 1"), Ok(71.0));
    }

    #[test]
    fn runaway_recursion_hits_the_depth_limit() {
        let config = Config {
            max_call_depth: 16,
            ..Config::default()
        };
        let mut env = Environment::from_config(&config);

        assert!(matches!(
            eval_in("fn down(n) { down(n) } down(1)", &mut env),
            Err(RuntimeError::CallDepthExceeded { limit: 16, .. })
        ));
        assert_eq!(env.call_depth(), 0);
        assert_eq!(env.depth(), 1);
    }

    #[test]
    fn frames_keep_caller_bindings() {
        let mut env = Environment::with_scoping(Scoping::Frames);
        let src = "ref a = 100 fn twice(a) { a * 2 } twice(4)";
        assert_eq!(eval_in(src, &mut env), Ok(8.0));
        assert_eq!(env.lookup_variable("a"), Ok(100.0));
    }

    #[test]
    fn shared_scoping_loses_colliding_global() {
        let mut env = Environment::with_scoping(Scoping::Shared);
        let src = "ref a = 100 fn twice(a) { a * 2 } twice(4)";
        assert_eq!(eval_in(src, &mut env), Ok(8.0));
        assert_eq!(
            env.lookup_variable("a"),
            Err(RuntimeError::NotDefined("a".into()))
        );
    }

    #[test]
    fn shared_scoping_clobbers_nested_parameters() {
        let mut env = Environment::with_scoping(Scoping::Shared);
        let src = "
            fn inner(x) { x }
            fn outer(x) { inner(x + 1) + x }
            outer(10)
        ";
        // `inner` overwrites and then removes `x`, so `outer` cannot read it back.
        assert_eq!(
            eval_in(src, &mut env),
            Err(RuntimeError::NotDefined("x".into()))
        );
    }

    #[test]
    fn frames_isolate_nested_parameters() {
        let src = "
            fn inner(x) { x }
            fn outer(x) { inner(x + 1) + x }
            outer(10)
        ";
        assert_eq!(eval_framed(src), Ok(21.0));
    }

    #[test]
    fn failed_call_still_releases_its_frame() {
        let mut env = Environment::with_scoping(Scoping::Frames);
        assert_eq!(
            eval_in("fn bad(p) { p + nope } bad(1)", &mut env),
            Err(RuntimeError::NotDefined("nope".into()))
        );
        assert_eq!(env.depth(), 1);
        assert!(!env.contains("p"));
    }

    #[test]
    fn callee_sees_caller_frame() {
        let src = "
            fn show() { secret }
            fn hide(secret) { show() }
            hide(42)
        ";
        assert_eq!(eval_framed(src), Ok(42.0));
    }

    #[test]
    fn body_declarations_outlive_the_call() {
        let src = "
            ref count = 0
            fn bump() { ref count = count + 1 }
            fn outer() { fn helper() { 5 } 0 }
            bump() bump() outer()
            count * 10 + helper()
        ";
        assert_eq!(eval(src), Ok(25.0));
        assert_eq!(eval_framed(src), Ok(25.0));
    }

    #[test]
    fn frames_rebind_parameters_locally() {
        let mut env = Environment::with_scoping(Scoping::Frames);
        let src = "ref a = 1 fn inc(a) { ref a = a + 10 a } inc(5)";
        assert_eq!(eval_in(src, &mut env), Ok(15.0));
        assert_eq!(env.lookup_variable("a"), Ok(1.0));
    }
}
