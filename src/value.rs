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

use std::fmt;

use serde::Serialize;

/// TALLY runtime value representation.
///
/// This is the type that flows through the interpreter; every node
/// evaluates to one of these. Numbers are the only variant today, but
/// callers match on `Value` rather than passing bare `f64`s around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Value {
    Number(f64),
}

impl Value {
    /// Result of an `if` chain where no branch ran and there is no `else`.
    pub const NO_BRANCH_TAKEN: Value = Value::Number(-1.0);

    /// Result of evaluating a function definition.
    pub const FUNCTION_DEFINED: Value = Value::Number(0.0);

    /// Result of a `while` loop whose body never ran.
    pub const LOOP_NEVER_RAN: Value = Value::Number(0.0);

    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
        }
    }

    /// Determines whether a value counts as **true** in a condition.
    ///
    /// # Truthiness Rules
    /// A number is true when it is **at least 1**. Everything else is false:
    /// - `0`, negative numbers
    /// - fractions below one, such as `0.999`
    /// - `NaN`
    pub fn is_truthy(&self) -> bool {
        self.as_number() >= 1.0
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl fmt::Display for Value {
    /// Whole numbers print without a fractional part: `14`, `-1`, `2.5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_boundary() {
        assert!(Value::Number(1.0).is_truthy());
        assert!(Value::Number(42.5).is_truthy());
        assert!(!Value::Number(0.999).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(-3.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
    }

    #[test]
    fn display_drops_trailing_zero() {
        assert_eq!(Value::Number(14.0).to_string(), "14");
        assert_eq!(Value::Number(-1.0).to_string(), "-1");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
    }
}
