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

/// Reserved words: `ref`, `fn`, `if`, `else`, `while`, `do`, `for`
pub mod keywords;

/// The cursor that walks source text and emits tokens
pub mod lexer;

/// The ordered rule table the cursor consults at every position
pub mod rules;

/// `Token`, `TokenKind`
pub mod token;

pub use keywords::Keyword;
pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
