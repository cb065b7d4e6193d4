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

use thiserror::Error;

use crate::span::Span;

/// No rule in the lexer's table matched the remaining input.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unexpected input `{fragment}` at {span}")]
pub struct LexError {
    /// Where the unmatched text starts.
    pub span: Span,

    /// The unmatched text, up to the next whitespace.
    pub fragment: String,
}

/// Malformed token sequences, detected while building the tree.
///
/// `found` is `None` when the parser ran out of tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected a number, found {}", describe(.found))]
    ExpectedNumber { found: Option<String>, span: Option<Span> },

    #[error("expected an identifier, found {}", describe(.found))]
    ExpectedIdentifier { found: Option<String>, span: Option<Span> },

    #[error("expected an operator, found {}", describe(.found))]
    ExpectedOperator { found: Option<String>, span: Option<Span> },

    #[error("expected an expression, found {}", describe(.found))]
    ExpectedExpression { found: Option<String>, span: Option<Span> },

    #[error("expected {expected}, found {}", describe(.found))]
    Expected {
        expected: String,
        found: Option<String>,
        span: Option<Span>,
    },

    #[error("nesting exceeded the limit of {limit} levels")]
    NestingTooDeep { limit: usize, span: Option<Span> },
}

fn describe(found: &Option<String>) -> String {
    found.clone().unwrap_or_else(|| "end of input".to_string())
}

impl ParseError {
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::ExpectedNumber { span, .. }
            | ParseError::ExpectedIdentifier { span, .. }
            | ParseError::ExpectedOperator { span, .. }
            | ParseError::ExpectedExpression { span, .. }
            | ParseError::Expected { span, .. }
            | ParseError::NestingTooDeep { span, .. } => *span,
        }
    }
}

/// Failures raised while walking the tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// The name is unbound, or bound to the wrong kind of binding.
    #[error("`{0}` is not defined")]
    NotDefined(String),

    #[error("`{name}` takes {expected} argument(s) but {found} were supplied")]
    InvalidParameterCount {
        name: String,
        expected: usize,
        found: usize,
    },

    /// An empty block has no last statement to produce a value.
    #[error("expected an expression, found an empty block")]
    ExpectedExpression,

    #[error("call depth exceeded the limit of {limit} while calling `{name}`")]
    CallDepthExceeded { name: String, limit: usize },

    #[error("loop exceeded the limit of {limit} iterations")]
    IterationLimitExceeded { limit: u64 },
}

/// Any failure of the tokenize → parse → evaluate pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Stable error code (T0001, T0101, …)
    pub fn code(&self) -> &'static str {
        match self {
            Error::Lex(_) => "T0001",
            Error::Parse(ParseError::ExpectedNumber { .. }) => "T0101",
            Error::Parse(ParseError::ExpectedIdentifier { .. }) => "T0102",
            Error::Parse(ParseError::ExpectedOperator { .. }) => "T0103",
            Error::Parse(ParseError::ExpectedExpression { .. }) => "T0104",
            Error::Parse(ParseError::Expected { .. }) => "T0105",
            Error::Parse(ParseError::NestingTooDeep { .. }) => "T0106",
            Error::Runtime(RuntimeError::NotDefined(_)) => "T0201",
            Error::Runtime(RuntimeError::InvalidParameterCount { .. }) => "T0202",
            Error::Runtime(RuntimeError::ExpectedExpression) => "T0203",
            Error::Runtime(RuntimeError::CallDepthExceeded { .. }) => "T0204",
            Error::Runtime(RuntimeError::IterationLimitExceeded { .. }) => "T0205",
        }
    }

    /// Primary source location, when the failure has one.
    ///
    /// Runtime errors are raised against the tree, which does not keep
    /// positions, so they never carry a span.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Lex(e) => Some(e.span),
            Error::Parse(e) => e.span(),
            Error::Runtime(_) => None,
        }
    }

    /// Optional note / help text
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Error::Lex(_) => Some("only numbers, names, `+ - * /` and `( ) { } [ ] , =` are valid"),
            Error::Parse(ParseError::ExpectedIdentifier { .. }) => {
                Some("function parameters must be plain names")
            }
            Error::Parse(ParseError::NestingTooDeep { .. }) => {
                Some("split the expression into `ref` steps, or raise `max_nesting_depth`")
            }
            Error::Runtime(RuntimeError::NotDefined(_)) => {
                Some("declare variables with `ref name = value` and functions with `fn`")
            }
            Error::Runtime(RuntimeError::ExpectedExpression) => {
                Some("a block evaluates to its last statement, so it cannot be empty")
            }
            _ => None,
        }
    }
}
