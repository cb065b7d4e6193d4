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

use tracing::{debug, trace};

use crate::error::LexError;
use crate::lexer::rules;
use crate::lexer::token::Token;
use crate::span::Span;

pub struct Lexer<'src> {
    source: &'src str,
    offset: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'src> Lexer<'src> {
    /// Creates a new TALLY lexer instance from raw source code.
    ///
    /// # Returns
    /// A fully initialized `Lexer` with:
    /// - Cursor at byte offset `0`
    /// - Line counter set to `1`, column counter set to `0`
    /// - Empty token output buffer
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 0,
            tokens: Vec::new(),
        }
    }

    /// Performs complete lexical analysis over the entire source input.
    ///
    /// # Behavior
    /// - Skips whitespace and `//` line comments
    /// - Runs the rule table at the cursor, taking the highest-priority match
    /// - Stops at the first position no rule matches
    ///
    /// # Errors
    /// A `LexError` carrying the position and the unmatched fragment.
    /// The lexer never panics on bad input.
    pub fn scan_tokens(mut self) -> Result<Vec<Token>, LexError> {
        loop {
            self.skip_trivia();
            if self.is_at_end() {
                break;
            }
            self.scan_token()?;
        }

        debug!(tokens = self.tokens.len(), "tokenized source");
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), LexError> {
        let rest = self.rest();
        let span = self.span();

        let Some(found) = rules::first_match(rest) else {
            let fragment: String = rest.chars().take_while(|c| !c.is_whitespace()).collect();
            return Err(LexError { span, fragment });
        };

        let lexeme = &rest[..found.len];
        trace!(rule = found.rule, lexeme, "matched token");
        self.tokens.push(Token::new(found.kind, lexeme, span));
        self.advance_by(found.len);
        Ok(())
    }

    /// Skips whitespace and line comments in any interleaving.
    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();

            if rest.starts_with("//") {
                let len = rest.find('\n').unwrap_or(rest.len());
                self.advance_by(len);
                continue;
            }

            match rest.chars().next() {
                Some(ch) if ch.is_whitespace() => self.bump(ch),
                _ => break,
            }
        }
    }

    fn advance_by(&mut self, len: usize) {
        let end = self.offset + len;
        while self.offset < end {
            match self.rest().chars().next() {
                Some(ch) => self.bump(ch),
                None => break,
            }
        }
    }

    fn bump(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    fn rest(&self) -> &'src str {
        &self.source[self.offset..]
    }

    fn span(&self) -> Span {
        Span::new(self.offset, self.line, self.column)
    }

    fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }
}

/// Converts source text into its ordered token sequence.
///
/// ```text
/// "ref x = 2 * PI"  →  [ref] [x] [=] [2] [*] [PI]
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).scan_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Operator;
    use crate::lexer::keywords::Keyword;
    use crate::lexer::token::TokenKind;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap_or_else(|e| panic!("lexing failed for {source:?}: {e}"))
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn declaration_tokens() {
        assert_eq!(
            kinds("ref x = 2 * PI"),
            vec![
                TokenKind::Keyword(Keyword::Ref),
                TokenKind::Identifier("x".into()),
                TokenKind::Equals,
                TokenKind::Number(2.0),
                TokenKind::Operator(Operator::Multiply),
                TokenKind::Identifier("PI".into()),
            ]
        );
    }

    #[test]
    fn function_definition_tokens() {
        assert_eq!(
            kinds("fn f(a, b) { a / b }"),
            vec![
                TokenKind::Keyword(Keyword::Fn),
                TokenKind::Identifier("f".into()),
                TokenKind::LeftParen,
                TokenKind::Identifier("a".into()),
                TokenKind::Comma,
                TokenKind::Identifier("b".into()),
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::Identifier("a".into()),
                TokenKind::Operator(Operator::Divide),
                TokenKind::Identifier("b".into()),
                TokenKind::RightBrace,
            ]
        );
    }

    #[test]
    fn number_followed_by_letters_splits() {
        assert_eq!(
            kinds("5x"),
            vec![TokenKind::Number(5.0), TokenKind::Identifier("x".into())]
        );
    }

    #[test]
    fn decimals_and_negative_literals() {
        assert_eq!(
            kinds("3.25 -0.5 - 1"),
            vec![
                TokenKind::Number(3.25),
                TokenKind::Number(-0.5),
                TokenKind::Operator(Operator::Subtract),
                TokenKind::Number(1.0),
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("1 // one\n// nothing here\n2"),
            vec![TokenKind::Number(1.0), TokenKind::Number(2.0)]
        );
    }

    #[test]
    fn spans_track_lines_and_columns() {
        let tokens = tokenize("ref a = 1\n  a").unwrap();
        let last = tokens.last().unwrap();
        assert_eq!(last.span, Span::new(12, 2, 2));
        assert_eq!(last.lexeme, "a");
    }

    #[test]
    fn unmatched_input_is_an_error_not_a_panic() {
        let err = tokenize("ref a = 1\nref b = a # 2").unwrap_err();
        assert_eq!(err.fragment, "#");
        assert_eq!(err.span, Span::new(20, 2, 10));
    }

    #[test]
    fn empty_and_blank_sources_have_no_tokens() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  \n\t ").unwrap().is_empty());
    }
}
