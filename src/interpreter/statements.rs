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

/*!
 * TALLY Statement Evaluator
 * -------------------------
 *
 * This module evaluates the **declaration and control-flow** nodes of the
 * TALLY tree.
 *
 * It does NOT evaluate arithmetic (handled by `expressions.rs`).
 * It does NOT execute function calls (handled by `calls.rs`).
 *
 * This file strictly handles:
 *
 *  • Variable declarations
 *  • Function definitions
 *  • If / else-if / else chains
 *  • While loops
 *  • Blocks
 *
 * Every statement produces a value; a block's value is its last statement's.
 */

use std::rc::Rc;

use tracing::trace;

use crate::ast::{Block, Branch, FunctionDefinition, Node};
use crate::error::RuntimeError;
use crate::interpreter::environment::Environment;
use crate::interpreter::evaluate;
use crate::interpreter::helpers::{all_truthy, is_truthy};
use crate::value::Value;

/// `ref name = value` evaluates, binds through `Environment::declare`,
/// and returns the bound value. Any earlier binding of the name, variable
/// or function, is replaced.
pub fn exec_variable_declaration(
    name: &str,
    value: &Node,
    env: &mut Environment,
) -> Result<Value, RuntimeError> {
    let value = evaluate(value, env)?;
    env.declare_variable(name, value.as_number());
    Ok(value)
}

/// Registers the function under its name, replacing any earlier binding.
pub fn exec_function_definition(
    function: &FunctionDefinition,
    env: &mut Environment,
) -> Result<Value, RuntimeError> {
    env.declare_function(Rc::new(function.clone()));
    Ok(Value::FUNCTION_DEFINED)
}

/// Runs the body of the first branch whose condition is truthy.
///
/// Conditions are evaluated in order and stop at the first true one.
/// With no true branch the `else` body runs, or the result is
/// `Value::NO_BRANCH_TAKEN` (`-1`), which is a value, not an error.
pub fn exec_if(
    branches: &[Branch],
    else_body: Option<&Block>,
    env: &mut Environment,
) -> Result<Value, RuntimeError> {
    for branch in branches {
        if is_truthy(&branch.condition, env)? {
            return exec_block(&branch.body, env);
        }
    }

    match else_body {
        Some(body) => exec_block(body, env),
        None => Ok(Value::NO_BRANCH_TAKEN),
    }
}

/// Repeats the body while every condition is truthy.
///
/// # Returns
/// - The value of the last body run
/// - `Value::LOOP_NEVER_RAN` (`0`) if the body never ran
pub fn exec_while(
    conditions: &[Node],
    body: &Block,
    env: &mut Environment,
) -> Result<Value, RuntimeError> {
    let limit = env.limits().max_loop_iterations;
    let mut last = Value::LOOP_NEVER_RAN;
    let mut iterations: u64 = 0;

    while all_truthy(conditions, env)? {
        if let Some(limit) = limit {
            if iterations >= limit {
                return Err(RuntimeError::IterationLimitExceeded { limit });
            }
        }

        last = exec_block(body, env)?;
        iterations += 1;
        trace!(iterations, value = %last, "loop iteration");
    }

    Ok(last)
}

/// Evaluates every statement in order and returns the last one's value.
///
/// # Errors
/// `ExpectedExpression` when the block has no statements.
pub fn exec_block(block: &Block, env: &mut Environment) -> Result<Value, RuntimeError> {
    let Some((last, leading)) = block.statements.split_last() else {
        return Err(RuntimeError::ExpectedExpression);
    };

    for statement in leading {
        evaluate(statement, env)?;
    }

    evaluate(last, env)
}
