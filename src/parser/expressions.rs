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
 * --------------------------------------------------------------------------
 *  MODULE OVERVIEW
 * --------------------------------------------------------------------------
 * This module contains the **entire TALLY expression grammar**:
 *
 *   expression := value (operator value)*
 *   value      := number | '(' expression ')' | identifier ['(' argList ')']
 *
 * Infix operators are grouped by precedence climbing over two tiers,
 * `+ -` (10) and `* /` (20):
 *
 *   10 - 3 - 2     →  (10 - 3) - 2
 *   2 + 3 * 4      →  2 + (3 * 4)
 *   2 * 3 + 4 * 5  →  (2 * 3) + (4 * 5)
 *
 * ==========================================================================
 */

use crate::ast::Node;
use crate::error::ParseError;
use crate::lexer::token::{Token, TokenKind};
use crate::parser::parser::Parser;

impl<'a> Parser<'a> {
    /// Parses a full infix expression.
    pub fn expression(&mut self) -> Result<Node, ParseError> {
        let left = self.value()?;
        self.climb(left, 0)
    }

    /// Folds operators of precedence `>= min_precedence` onto `left`.
    ///
    /// After each right-hand value, any operator that binds strictly
    /// tighter than the one just consumed is absorbed into the right-hand
    /// side first, with the minimum raised by one. Equal precedence falls
    /// through to the outer loop, which keeps a tier left-associative.
    fn climb(&mut self, mut left: Node, min_precedence: u8) -> Result<Node, ParseError> {
        while self
            .peek_operator()
            .is_some_and(|op| op.precedence() >= min_precedence)
        {
            let operator = self.expect_operator()?;
            let mut right = self.value()?;

            while self
                .peek_operator()
                .is_some_and(|next| next.precedence() > operator.precedence())
            {
                right = self.climb(right, operator.precedence() + 1)?;
            }

            left = Node::infix(operator, left, right);
        }

        Ok(left)
    }

    /// Parses a single operand.
    fn value(&mut self) -> Result<Node, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Number(_)) => Ok(Node::Literal(self.expect_number()?)),

            Some(TokenKind::LeftParen) => self.descend(|p| {
                p.advance();
                let inner = p.expression()?;
                p.expect(&TokenKind::RightParen, "`)`")?;
                Ok(inner)
            }),

            Some(TokenKind::Identifier(_)) => {
                let name = self.expect_identifier()?;

                if !self.match_kind(&TokenKind::LeftParen) {
                    return Ok(Node::Identifier(name));
                }

                let arguments = self.descend(|p| {
                    let arguments: Vec<Node> = p
                        .comma_list()?
                        .into_iter()
                        .map(|(argument, _)| argument)
                        .collect();
                    p.expect(&TokenKind::RightParen, "`)`")?;
                    Ok(arguments)
                })?;

                Ok(Node::FunctionCall { name, arguments })
            }

            _ => Err(self.expected_expression()),
        }
    }

    /// Parses `(expression (',' expression)*)?` up to, not including, `)`.
    ///
    /// Each entry is paired with its first token for error reporting.
    /// After a comma one more entry is *attempted*; if it fails, only that
    /// attempt is abandoned and the cursor is rewound to just after the
    /// comma. This is the parser's single backtracking point, and the
    /// reason `f(1, 2,)` is accepted. When the rewound cursor is not on the
    /// closing `)`, the abandoned entry's own error is returned.
    pub(crate) fn comma_list(&mut self) -> Result<Vec<(Node, &'a Token)>, ParseError> {
        let mut entries = Vec::new();

        if self.check(&TokenKind::RightParen) {
            return Ok(entries);
        }

        entries.push(self.list_entry()?);

        while self.match_kind(&TokenKind::Comma) {
            let checkpoint = self.current;
            match self.list_entry() {
                Ok(entry) => entries.push(entry),
                Err(error) => {
                    self.current = checkpoint;
                    if !self.check(&TokenKind::RightParen) {
                        return Err(error);
                    }
                    break;
                }
            }
        }

        Ok(entries)
    }

    fn list_entry(&mut self) -> Result<(Node, &'a Token), ParseError> {
        let first = self.peek().ok_or_else(|| self.expected_expression())?;
        let node = self.expression()?;
        Ok((node, first))
    }
}
