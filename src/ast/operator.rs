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

/// The four arithmetic infix operators.
///
/// Operators fall into two precedence tiers:
///
/// | Tier | Operators | Precedence |
/// |------|-----------|------------|
/// | term | `+` `-`   | 10         |
/// | factor | `*` `/` | 20         |
///
/// Within a tier grouping is left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 10,
            Operator::Multiply | Operator::Divide => 20,
        }
    }

    /// Applies the operator with plain IEEE-754 semantics.
    ///
    /// Division by zero yields `inf`, `-inf` or `NaN`; it is a value,
    /// never an error.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_binds_tighter_than_term() {
        assert!(Operator::Multiply.precedence() > Operator::Add.precedence());
        assert_eq!(Operator::Divide.precedence(), Operator::Multiply.precedence());
        assert_eq!(Operator::Subtract.precedence(), Operator::Add.precedence());
    }

    #[test]
    fn division_by_zero_is_a_value() {
        assert_eq!(Operator::Divide.apply(1.0, 0.0), f64::INFINITY);
        assert!(Operator::Divide.apply(0.0, 0.0).is_nan());
    }
}
