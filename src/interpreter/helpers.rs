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

use crate::ast::Node;
use crate::error::RuntimeError;
use crate::interpreter::environment::Environment;
use crate::interpreter::evaluate;

/// Evaluates a condition and applies TALLY truthiness (`>= 1`).
///
/// # Truthiness Rules
/// - `1`, `2`, `1.5` → true
/// - `0`, `0.999`, `-4` → false
///
/// The boundary sits at one rather than zero, so `if 0.5 { ... }` does
/// **not** run its body.
pub fn is_truthy(condition: &Node, env: &mut Environment) -> Result<bool, RuntimeError> {
    Ok(evaluate(condition, env)?.is_truthy())
}

/// Evaluates **every** condition, then reports whether all were truthy.
///
/// No short-circuiting: a call inside a later condition still runs even
/// when an earlier one is already false.
pub fn all_truthy(conditions: &[Node], env: &mut Environment) -> Result<bool, RuntimeError> {
    let mut all = true;
    for condition in conditions {
        all &= is_truthy(condition, env)?;
    }
    Ok(all)
}
