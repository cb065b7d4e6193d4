/*
 * ==========================================================================
 * TALLY - Count on it.
 * ==========================================================================
 *
 * Core Recursive-Descent Parser Entry Point
 *
 * This file defines the primary `Parser` structure and the public `parse()`
 * driver function used to transform a token stream into the top-level
 * `Block` of a TALLY program.
 *
 * The parsing implementation itself is split across multiple modules:
 * - `statements.rs`   → Statement-level grammar (`ref`, `fn`, `if`, `while`)
 * - `expressions.rs`  → Values, calls & precedence climbing
 * - `helpers.rs`      → Token matching, consumption & block extraction
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

use tracing::debug;

use crate::ast::Block;
use crate::error::ParseError;
use crate::lexer::token::Token;

/// The core TALLY recursive-descent parser.
///
/// This structure maintains:
/// - A borrowed slice of the token stream
/// - The current cursor position into that slice
/// - The token just past the slice, if any (the `}` closing a block)
/// - How deeply the cursor sits inside parentheses, calls and blocks
///
/// Blocks are parsed by a **fresh** `Parser` over the token range between
/// a `{` and its matching `}`, so every parser sees a self-contained program.
pub struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) current: usize,
    pub(crate) boundary: Option<&'a Token>,
    pub(crate) depth: usize,
    pub(crate) max_depth: usize,
}

/// Nesting allowed by `parse` when no limit is configured.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

/// Public entry point for the TALLY parsing phase.
///
/// # TALLY Pipeline
/// ```text
/// Source → Lexer → Tokens → Parser → Block → Interpreter
/// ```
///
/// # Errors
/// The first `ParseError` encountered, in source order.
pub fn parse(tokens: &[Token]) -> Result<Block, ParseError> {
    parse_with_limit(tokens, DEFAULT_MAX_NESTING_DEPTH)
}

/// Like `parse`, failing with `NestingTooDeep` past `max_depth` levels of
/// parentheses, argument lists and blocks.
pub fn parse_with_limit(tokens: &[Token], max_depth: usize) -> Result<Block, ParseError> {
    let program = Parser::with_max_depth(tokens, max_depth).parse()?;
    debug!(statements = program.statements.len(), "parsed program");
    Ok(program)
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_NESTING_DEPTH)
    }

    pub fn with_max_depth(tokens: &'a [Token], max_depth: usize) -> Self {
        Self {
            tokens,
            current: 0,
            boundary: None,
            depth: 0,
            max_depth,
        }
    }

    /// A parser for the body of a block one level below this one.
    pub(crate) fn nested(&self, tokens: &'a [Token], boundary: Option<&'a Token>) -> Self {
        Self {
            tokens,
            current: 0,
            boundary,
            depth: self.depth + 1,
            max_depth: self.max_depth,
        }
    }

    /// Parses the entire token slice into a list of statements.
    ///
    /// `program := statement*`
    pub fn parse(&mut self) -> Result<Block, ParseError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.statement()?);
        }

        Ok(Block::new(statements))
    }
}
