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

use std::fmt::Write;

use crate::error::Error;

/// Responsible for rendering human-friendly, compiler-style diagnostics
/// for TALLY errors.
///
/// This printer:
/// - Formats errors with their stable code and file/line/column
/// - Displays the offending source line
/// - Highlights the exact error position using a caret (`^`)
/// - Optionally shows a helpful follow-up hint
///
/// Runtime errors have no source position; for those only the header and
/// the hint are printed.
pub struct DiagnosticPrinter {
    /// Full source text the error was raised against.
    source: String,

    /// Name of the source (a file name, or `<input>`). Display only.
    file_name: String,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Renders a diagnostic into a string.
    ///
    /// # Output Example
    /// ```text
    /// error[T0001]: unexpected input `#` at 2:11
    ///   --> script.tally:2:11
    ///    |
    ///  2 | ref b = a # 2
    ///    |           ^
    ///
    /// help: only numbers, names, `+ - * /` and `( ) { } [ ] , =` are valid
    /// ```
    pub fn render(&self, error: &Error) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "error[{}]: {}", error.code(), error);

        match error.span() {
            Some(span) => {
                let src_line = self
                    .source
                    .lines()
                    .nth(span.line.saturating_sub(1))
                    .unwrap_or("");

                let _ = writeln!(out, "  --> {}:{}", self.file_name, span);
                let _ = writeln!(out, "   |");
                let _ = writeln!(out, "{:>3} | {}", span.line, src_line);
                let _ = writeln!(out, "   | {}^", " ".repeat(span.column));
            }
            None => {
                let _ = writeln!(out, "  --> {}", self.file_name);
            }
        }

        if let Some(help) = error.help() {
            let _ = writeln!(out, "\nhelp: {}", help);
        }

        out
    }

    /// Prints a formatted error diagnostic to stderr.
    pub fn print(&self, error: &Error) {
        eprint!("{}", self.render(error));
    }
}
