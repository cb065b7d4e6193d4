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

use tracing::trace;

use crate::ast::{Block, Operator};
use crate::error::ParseError;
use crate::lexer::keywords::Keyword;
use crate::lexer::token::{Token, TokenKind};
use crate::parser::parser::Parser;
use crate::span::Span;

impl<'a> Parser<'a> {
    /// Returns the current token without consuming it.
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.current)
    }

    pub fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    /// Advances one token forward.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.current)?;
        self.current += 1;
        Some(token)
    }

    /// Returns true once every token of the slice is consumed.
    pub fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Checks if the current token has exactly this kind.
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Matches a token kind and consumes it.
    pub fn match_kind(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Matches a TALLY keyword and consumes it if present.
    pub fn match_keyword(&mut self, keyword: Keyword) -> bool {
        self.match_kind(&TokenKind::Keyword(keyword))
    }

    /// The operator at the cursor, if the cursor is on one.
    pub fn peek_operator(&self) -> Option<Operator> {
        match self.peek_kind() {
            Some(TokenKind::Operator(op)) => Some(*op),
            _ => None,
        }
    }

    /// Consumes a required token or fails with `Expected(description)`.
    pub fn expect(&mut self, kind: &TokenKind, description: &str) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }

        let (found, span) = self.found();
        Err(ParseError::Expected {
            expected: description.to_string(),
            found,
            span,
        })
    }

    /// Consumes and returns an identifier name.
    pub fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Some(TokenKind::Identifier(name)) = self.peek_kind() {
            self.current += 1;
            return Ok(name.clone());
        }

        let (found, span) = self.found();
        Err(ParseError::ExpectedIdentifier { found, span })
    }

    /// Consumes and returns a numeric literal.
    pub fn expect_number(&mut self) -> Result<f64, ParseError> {
        if let Some(TokenKind::Number(value)) = self.peek_kind() {
            self.current += 1;
            return Ok(*value);
        }

        let (found, span) = self.found();
        Err(ParseError::ExpectedNumber { found, span })
    }

    /// Consumes and returns an arithmetic operator.
    pub fn expect_operator(&mut self) -> Result<Operator, ParseError> {
        if let Some(op) = self.peek_operator() {
            self.current += 1;
            return Ok(op);
        }

        let (found, span) = self.found();
        Err(ParseError::ExpectedOperator { found, span })
    }

    pub fn expected_expression(&self) -> ParseError {
        let (found, span) = self.found();
        ParseError::ExpectedExpression { found, span }
    }

    /// Describes the token at the cursor for an error message.
    ///
    /// At the end of a block slice this is the closing `}`; at the end of
    /// the whole program it is `None` ("end of input") and the span points
    /// at the last token.
    pub(crate) fn found(&self) -> (Option<String>, Option<Span>) {
        match self.peek().or(self.boundary) {
            Some(token) => (Some(token.kind.describe()), Some(token.span)),
            None => (None, self.tokens.last().map(|t| t.span)),
        }
    }

    /// Runs `parse` one nesting level deeper, failing with `NestingTooDeep`
    /// at the token that would open the level past the limit.
    pub(crate) fn descend<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.check_depth()?;
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn check_depth(&self) -> Result<(), ParseError> {
        if self.depth < self.max_depth {
            return Ok(());
        }

        let (_, span) = self.found();
        Err(ParseError::NestingTooDeep {
            limit: self.max_depth,
            span,
        })
    }

    /// Parses `'{' statement* '}'`.
    ///
    /// After the opening brace the matching `}` is located by counting
    /// brace depth, without interpreting anything in between. The token
    /// range between the braces is handed to a fresh parser, and the cursor
    /// jumps past the closing brace.
    pub fn block(&mut self) -> Result<Block, ParseError> {
        self.check_depth()?;
        self.expect(&TokenKind::LeftBrace, "`{`")?;

        let start = self.current;
        let mut end = start;
        let mut depth = 1usize;

        while let Some(token) = self.tokens.get(end) {
            match token.kind {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            end += 1;
        }

        if depth != 0 {
            return Err(ParseError::Expected {
                expected: "`}`".to_string(),
                found: None,
                span: self.tokens.last().map(|t| t.span),
            });
        }

        trace!(tokens = end - start, "extracted block");
        let tokens = self.tokens;
        let block = self.nested(&tokens[start..end], tokens.get(end)).parse()?;
        self.current = end + 1;
        Ok(block)
    }
}
