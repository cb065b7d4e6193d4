/*
 * ==========================================================================
 * TALLY - Count on it.
 * ==========================================================================
 *
 * Call Dispatch & Invocation
 * --------------------------
 * This module defines the **runtime call semantics** of TALLY:
 *
 *  - Resolving the callee by name
 *  - Checking the argument count against the declared parameters
 *  - Evaluating arguments eagerly, left to right, before any binding
 *  - Binding parameters and releasing them when the call ends
 *
 * --------------------------------------------------------------------------
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

use tracing::trace;

use crate::ast::Node;
use crate::error::RuntimeError;
use crate::interpreter::environment::Environment;
use crate::interpreter::evaluate;
use crate::interpreter::statements::exec_block;
use crate::value::Value;

/// Executes a **user-defined TALLY function**.
///
/// This function:
/// 1. Looks the name up; it must be bound to a function
/// 2. Checks that the argument count equals the parameter count
/// 3. Evaluates every argument in the environment as it stands now
/// 4. Binds the parameters (see `Environment::enter_call`)
/// 5. Evaluates the body block and returns its value
///
/// The parameter bindings are released when the call scope drops, so an
/// error inside the body unwinds them exactly like a normal return.
///
/// # Errors
/// - `NotDefined` if the name is unbound or bound to a variable
/// - `InvalidParameterCount` on an arity mismatch
/// - `CallDepthExceeded` past the configured nesting limit
/// - anything raised by an argument or the body
pub fn call_function(
    name: &str,
    arguments: &[Node],
    env: &mut Environment,
) -> Result<Value, RuntimeError> {
    let function = env.lookup_function(name)?;

    if function.params.len() != arguments.len() {
        return Err(RuntimeError::InvalidParameterCount {
            name: name.to_string(),
            expected: function.params.len(),
            found: arguments.len(),
        });
    }

    let mut values = Vec::with_capacity(arguments.len());
    for argument in arguments {
        values.push(evaluate(argument, env)?.as_number());
    }

    trace!(function = name, arguments = ?values, "calling function");

    let mut scope = env.enter_call(&function, values)?;
    let result = exec_block(&function.body, &mut scope)?;

    trace!(function = name, value = %result, "function returned");
    Ok(result)
}
