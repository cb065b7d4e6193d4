/*
 * ==========================================================================
 * TALLY - Count on it.
 * ==========================================================================
 *
 * File:      rules.rs
 * Purpose:   The ordered (pattern, classifier) table consulted by the lexer.
 *
 * Author:    Sam Wilcox
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

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Operator;
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;

/// Turns the text matched by a rule into a token kind.
///
/// Returning `None` rejects the match and lets the next rule try.
pub type Classifier = fn(&str) -> Option<TokenKind>;

/// One entry of the lexer's rule table.
pub struct Rule {
    pub name: &'static str,
    pattern: Regex,
    classify: Classifier,
}

/// The result of running the rule table against the remaining input.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    pub rule: &'static str,
    pub len: usize,
    pub kind: TokenKind,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, classify: Classifier) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("lexer rule patterns are valid"),
            classify,
        }
    }

    /// Matches this rule against the start of `input`.
    ///
    /// Every pattern is anchored with `^`, so a hit is always a prefix.
    /// Empty matches never count.
    pub fn match_prefix(&self, input: &str) -> Option<RuleMatch> {
        let found = self.pattern.find(input)?;
        if found.start() != 0 || found.is_empty() {
            return None;
        }

        let kind = (self.classify)(found.as_str())?;
        Some(RuleMatch {
            rule: self.name,
            len: found.end(),
            kind,
        })
    }
}

/// The rule table, in priority order. **The order is part of the language.**
///
/// 1. `number`     : `-?digits(.digits?)?`, checked before `operator` so
///    the sign of `-5` stays on the literal
/// 2. `operator`   : `*` `/` `+` `-`
/// 3. `identifier` : `[A-Za-z_$][A-Za-z0-9_$]*`, reserved words become keywords
/// 4. `punctuation`: `(` `)` `=` `{` `}` `[` `]` `,`
///
/// Identifiers cannot start with a digit, so `5x` lexes as the number `5`
/// followed by the identifier `x`.
pub static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new("number", r"^-?[0-9]+(?:\.[0-9]*)?", classify_number),
        Rule::new("operator", r"^[*/+\-]", classify_operator),
        Rule::new("identifier", r"^[A-Za-z_$][A-Za-z0-9_$]*", classify_word),
        Rule::new("punctuation", r"^[()=\{\}\[\],]", classify_punctuation),
    ]
});

/// Returns the highest-priority rule matching a non-empty prefix of `input`.
///
/// Earlier rules win; later rules are never consulted once one matches.
pub fn first_match(input: &str) -> Option<RuleMatch> {
    RULES.iter().find_map(|rule| rule.match_prefix(input))
}

fn classify_number(text: &str) -> Option<TokenKind> {
    text.parse::<f64>().ok().map(TokenKind::Number)
}

fn classify_operator(text: &str) -> Option<TokenKind> {
    Operator::from_symbol(text).map(TokenKind::Operator)
}

fn classify_word(text: &str) -> Option<TokenKind> {
    Some(match Keyword::lookup(text) {
        Some(keyword) => TokenKind::Keyword(keyword),
        None => TokenKind::Identifier(text.to_string()),
    })
}

fn classify_punctuation(text: &str) -> Option<TokenKind> {
    match text {
        "(" => Some(TokenKind::LeftParen),
        ")" => Some(TokenKind::RightParen),
        "{" => Some(TokenKind::LeftBrace),
        "}" => Some(TokenKind::RightBrace),
        "[" => Some(TokenKind::LeftBracket),
        "]" => Some(TokenKind::RightBracket),
        "," => Some(TokenKind::Comma),
        "=" => Some(TokenKind::Equals),
        _ => None,
    }
}
