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

use crate::ast::Operator;
use crate::lexer::keywords::Keyword;
use crate::span::Span;

/// Represents the **category of a lexical token** in the TALLY language.
///
/// # Compiler Pipeline Role
/// ```text
/// Source Code → Lexer → TokenKind → Parser → AST → Interpreter
/// ```
///
/// Unlike a plain tag, literal and identifier kinds carry their decoded
/// payload so the parser never has to re-read the lexeme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenKind {
    /// An arithmetic operator: `+`, `-`, `*`, `/`.
    Operator(Operator),

    /// A decimal literal, optionally negative: `42`, `3.14`, `-7`.
    Number(f64),

    /// A user-defined name for a variable or function.
    Identifier(String),

    /// A reserved word, see `keywords.rs`.
    Keyword(Keyword),

    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Equals,
}

impl TokenKind {
    /// A short human-readable description used in parse errors.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Operator(op) => format!("operator `{}`", op),
            TokenKind::Number(n) => format!("number `{}`", n),
            TokenKind::Identifier(name) => format!("identifier `{}`", name),
            TokenKind::Keyword(kw) => format!("keyword `{}`", kw),
            TokenKind::LeftParen => "`(`".to_string(),
            TokenKind::RightParen => "`)`".to_string(),
            TokenKind::LeftBrace => "`{`".to_string(),
            TokenKind::RightBrace => "`}`".to_string(),
            TokenKind::LeftBracket => "`[`".to_string(),
            TokenKind::RightBracket => "`]`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::Equals => "`=`".to_string(),
        }
    }
}

/// Represents a **single lexical token** produced by the TALLY lexer.
///
/// # Example Tokens
/// ```text
/// ref  →  { kind: Keyword(Ref),       lexeme: "ref", span: 1:1 }
/// x    →  { kind: Identifier("x"),    lexeme: "x",   span: 1:5 }
/// -42  →  { kind: Number(-42.0),      lexeme: "-42", span: 1:9 }
/// ```
///
/// Tokens are immutable once created and are produced in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The classified category of the token.
    pub kind: TokenKind,

    /// The exact source text that produced this token.
    pub lexeme: String,

    /// Where the token starts in the source.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    /// Formats a token for **user-facing output**.
    ///
    /// Only the lexeme is printed; `{:?}` is reserved for developer
    /// introspection.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}
