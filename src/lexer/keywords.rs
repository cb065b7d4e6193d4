/*
 * ==========================================================================
 * TALLY - Count on it.
 * ==========================================================================
 *
 * File:      keywords.rs
 * Purpose:   Defines all reserved keywords for the TALLY scripting language.
 *
 * Author:    Sam Wilcox
 *
 * License:
 * This file is part of the TALLY scripting engine project.
 *
 * TALLY is dual-licensed under the terms of:
 *   - The MIT License
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

/// A reserved TALLY keyword.
///
/// The identifier rule in the lexer produces a `Keyword` token instead of
/// an identifier whenever the matched word is **exactly** one of these.
///
/// # TALLY Examples
/// ```text
/// ref      -> keyword
/// while    -> keyword
/// refs     -> identifier
/// If       -> identifier (keywords are case-sensitive)
/// ```
///
/// `do` and `for` are reserved but `do` has no grammar of its own, and
/// `for` is parsed exactly like `while`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Keyword {
    Ref,
    Fn,
    If,
    Else,
    While,
    Do,
    For,
}

impl Keyword {
    /// Resolves a word to its keyword, if it is reserved.
    pub fn lookup(word: &str) -> Option<Keyword> {
        match word {
            "ref" => Some(Keyword::Ref),
            "fn" => Some(Keyword::Fn),
            "if" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            "while" => Some(Keyword::While),
            "do" => Some(Keyword::Do),
            "for" => Some(Keyword::For),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Ref => "ref",
            Keyword::Fn => "fn",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Do => "do",
            Keyword::For => "for",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_words_are_exact_matches() {
        assert_eq!(Keyword::lookup("ref"), Some(Keyword::Ref));
        assert_eq!(Keyword::lookup("for"), Some(Keyword::For));
        assert_eq!(Keyword::lookup("refs"), None);
        assert_eq!(Keyword::lookup("While"), None);
    }
}
