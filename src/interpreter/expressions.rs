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

use crate::ast::{Node, Operator};
use crate::error::RuntimeError;
use crate::interpreter::environment::Environment;
use crate::interpreter::evaluate;
use crate::value::Value;

/// Identifier lookup. Only variables resolve; a function name used as a
/// value is `NotDefined`.
pub fn eval_identifier(name: &str, env: &Environment) -> Result<Value, RuntimeError> {
    env.lookup_variable(name).map(Value::from)
}

/// Evaluates both operands, left first, then applies the operator.
///
/// There is no short-circuiting, and division by zero produces the
/// floating-point `inf` / `NaN` rather than an error.
///
/// A chain like `1 + 2 + 3 + …` parses into a left-leaning tree as deep as
/// the chain is long, so the left spine is walked in a loop instead of
/// recursively.
pub fn eval_infix(
    operator: Operator,
    left: &Node,
    right: &Node,
    env: &mut Environment,
) -> Result<Value, RuntimeError> {
    let mut pending = vec![(operator, right)];
    let mut leftmost = left;

    while let Node::Infix { operator, left, right } = leftmost {
        pending.push((*operator, right.as_ref()));
        leftmost = left.as_ref();
    }

    let mut acc = evaluate(leftmost, env)?.as_number();
    for (operator, right) in pending.into_iter().rev() {
        let r = evaluate(right, env)?.as_number();
        acc = operator.apply(acc, r);
    }

    Ok(acc.into())
}
