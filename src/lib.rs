/*
 * ==========================================================================
 * TALLY - Count on it.
 * ==========================================================================
 *
 * A tiny scripting engine for hosts that need numbers out of text:
 *
 *   ref rate = 0.2
 *   fn net(gross) { gross - gross * rate }
 *   net(250)
 *
 * Source text goes through three stages:
 *
 *   tokenize  →  parse  →  evaluate
 *
 * and every value is a single floating-point number.
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

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod value;

use tracing::debug;

pub use ast::{Block, Node};
pub use config::{Config, ConfigError, Scoping};
pub use error::{Error, LexError, ParseError, RuntimeError};
pub use interpreter::{evaluate, Environment};
pub use lexer::{tokenize, Token};
pub use parser::{parse, parse_with_limit};
pub use value::Value;

/// An embeddable evaluation session.
///
/// The engine owns one `Environment` for its whole life, so bindings made
/// by one `run` are visible to the next:
///
/// ```
/// let mut engine = tally::Engine::new();
/// engine.run("ref x = 7").unwrap();
/// assert_eq!(engine.run("x * 2").unwrap().as_number(), 14.0);
/// ```
pub struct Engine {
    env: Environment,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            env: Environment::from_config(&config),
        }
    }

    /// Tokenizes, parses and evaluates `source`.
    ///
    /// # Errors
    /// The first failure of any stage. Nothing is evaluated if lexing or
    /// parsing fails; bindings made before a runtime error are kept.
    pub fn run(&mut self, source: &str) -> Result<Value, Error> {
        let tokens = tokenize(source)?;
        let program = parse_with_limit(&tokens, self.env.limits().max_nesting_depth)?;
        debug!(statements = program.statements.len(), "running program");
        Ok(interpreter::run_in_env(&program, &mut self.env)?)
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Lets the host bind values before a run, e.g. script inputs.
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }
}

/// Runs `source` once in a fresh default environment.
pub fn run(source: &str) -> Result<Value, Error> {
    Engine::new().run(source)
}
