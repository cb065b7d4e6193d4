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

use crate::ast::{Branch, FunctionDefinition, Node};
use crate::error::ParseError;
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::parser::Parser;

impl<'a> Parser<'a> {
    /// Parses a single TALLY statement.
    ///
    /// This is the **main dispatcher** for all statement grammar forms.
    /// It inspects the leading keyword and routes to the matching rule,
    /// falling back to an expression statement.
    ///
    /// ```text
    /// statement := varDecl | funcDef | ifStmt | whileStmt | expression
    /// ```
    pub fn statement(&mut self) -> Result<Node, ParseError> {
        if self.match_keyword(Keyword::Ref) {
            return self.variable_declaration();
        }

        if self.match_keyword(Keyword::Fn) {
            return self.function_definition();
        }

        if self.match_keyword(Keyword::If) {
            return self.if_statement();
        }

        // `for` has no loop clauses of its own and shares the `while` path
        if self.match_keyword(Keyword::While) || self.match_keyword(Keyword::For) {
            return self.while_statement();
        }

        self.expression()
    }

    /// `'ref' identifier '=' expression`
    fn variable_declaration(&mut self) -> Result<Node, ParseError> {
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Equals, "`=`")?;
        let value = self.expression()?;

        Ok(Node::VariableDeclaration {
            name,
            value: Box::new(value),
        })
    }

    /// `'fn' identifier '(' paramList ')' block`
    ///
    /// Each parameter entry must reduce to a bare identifier; anything
    /// else, including a call, is `ExpectedIdentifier` reported at the
    /// entry's first token.
    fn function_definition(&mut self) -> Result<Node, ParseError> {
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::LeftParen, "`(`")?;

        let mut params = Vec::new();
        for (entry, first) in self.comma_list()? {
            match entry {
                Node::Identifier(param) => params.push(param),
                _ => {
                    return Err(ParseError::ExpectedIdentifier {
                        found: Some(first.kind.describe()),
                        span: Some(first.span),
                    })
                }
            }
        }

        self.expect(&TokenKind::RightParen, "`)`")?;
        let body = self.block()?;

        Ok(Node::FunctionDefinition(FunctionDefinition { name, params, body }))
    }

    /// `'if' expression block ('else' (ifStmt | block))?`
    ///
    /// `else if` arms are appended to the same node rather than nested.
    fn if_statement(&mut self) -> Result<Node, ParseError> {
        let mut branches = vec![self.branch()?];
        let mut else_body = None;

        while self.match_keyword(Keyword::Else) {
            if self.match_keyword(Keyword::If) {
                branches.push(self.branch()?);
                continue;
            }

            else_body = Some(self.block()?);
            break;
        }

        Ok(Node::If { branches, else_body })
    }

    fn branch(&mut self) -> Result<Branch, ParseError> {
        let condition = self.expression()?;
        let body = self.block()?;
        Ok(Branch { condition, body })
    }

    /// `'while' expression block`
    fn while_statement(&mut self) -> Result<Node, ParseError> {
        let condition = self.expression()?;
        let body = self.block()?;

        Ok(Node::While {
            conditions: vec![condition],
            body,
        })
    }
}
